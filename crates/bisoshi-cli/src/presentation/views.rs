use std::fmt;

use super::format::{self, money, percent};
use super::style::Palette;
use bisoshi_engine::BoardOverview;
use bisoshi_types::{ChatEntry, ChatRole, Course, FieldKind, ResourceSpec, Row};

/// One record as label/value lines, in column order.
pub struct RecordView<'a, R> {
    pub spec: &'static ResourceSpec,
    pub row: &'a R,
    pub palette: Palette,
}

impl<R: Row> fmt::Display for RecordView<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .spec
            .columns
            .iter()
            .map(|c| c.label.chars().count())
            .max()
            .unwrap_or(0)
            .max(2);

        writeln!(
            f,
            "{}  {}",
            self.palette.dim(&format!("{:<width$}", "ID")),
            self.row.row_id()
        )?;
        for column in self.spec.columns.iter().filter(|c| c.id != "id") {
            let value = format::cell(self.row.field(column.id), column.format);
            writeln!(
                f,
                "{}  {}",
                self.palette.dim(&format!("{:<width$}", column.label)),
                value
            )?;
        }
        Ok(())
    }
}

pub struct FieldListView {
    pub spec: &'static ResourceSpec,
}

impl fmt::Display for FieldListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .spec
            .form_fields
            .iter()
            .map(|field| field.name.len())
            .max()
            .unwrap_or(0);
        for field in self.spec.form_fields {
            let kind = match field.kind {
                FieldKind::Text => "text",
                FieldKind::Number => "number",
            };
            writeln!(f, "{:<width$}  {:<6}  {}", field.name, kind, field.label)?;
        }
        Ok(())
    }
}

pub struct CourseListView<'a> {
    pub courses: &'a [Course],
    pub palette: Palette,
}

impl fmt::Display for CourseListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for course in self.courses {
            writeln!(
                f,
                "{:>2}  {}  {}",
                course.id,
                self.palette.header(&course.title),
                self.palette.dim(&format!(
                    "starts {}, {:.1}/5 ({} reviews)",
                    course.start_date, course.rating, course.reviews
                ))
            )?;
            writeln!(f, "    {}", format::truncate(&course.description, 72))?;
        }
        Ok(())
    }
}

pub struct CourseView<'a> {
    pub course: &'a Course,
    pub palette: Palette,
}

impl fmt::Display for CourseView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let course = self.course;
        writeln!(f, "{}", self.palette.header(&course.title))?;
        writeln!(f, "{}\n", course.description)?;
        writeln!(f, "Starts:  {}", course.start_date)?;
        writeln!(
            f,
            "Rating:  {:.1}/5 ({} reviews)",
            course.rating, course.reviews
        )?;
        if !course.tags.is_empty() {
            writeln!(f, "Tags:    {}", course.tags.join(", "))?;
        }
        writeln!(f, "Video:   {}", course.video)?;
        writeln!(f, "\nSyllabus:")?;
        for (i, topic) in course.syllabus.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, topic)?;
        }
        Ok(())
    }
}

pub struct OverviewView<'a> {
    pub data: &'a BoardOverview,
    pub palette: Palette,
}

impl fmt::Display for OverviewView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.data;
        let p = &self.palette;

        writeln!(f, "{}", p.header(&format!("Overview {}", d.year)))?;
        let trend = percent(d.year_over_year_pct);
        let trend = if d.year_over_year_pct < 0.0 {
            p.bad(&trend)
        } else {
            p.good(&trend)
        };
        writeln!(
            f,
            "  Sales {}:      {}  ({} vs {})",
            d.year,
            money(d.year_total),
            trend,
            money(d.previous_year_total)
        )?;
        writeln!(f, "  Gross profit:    {}", money(d.gross_profit))?;
        writeln!(f, "  Gross margin:    {:.1}%", d.gross_margin_pct)?;
        writeln!(f, "  Avg unit price:  {}", money(d.average_unit_price))?;

        writeln!(f, "\n{}", p.header("Inventory"))?;
        writeln!(f, "  Products:        {}", d.products.product_count)?;
        writeln!(f, "  Stock value:     {}", money(d.products.total_sales))?;
        writeln!(
            f,
            "  Units in stock:  {}",
            bisoshi_types::format_number(d.products.total_volume)
        )?;
        for (category, amount) in &d.products.sales_by_category {
            let volume = d
                .products
                .volume_by_category
                .get(category)
                .copied()
                .unwrap_or(0.0);
            writeln!(
                f,
                "    {:<16} {:>16}  {} units",
                category,
                money(*amount),
                bisoshi_types::format_number(volume)
            )?;
        }

        writeln!(f, "\n{}", p.header("Sales by year"))?;
        if d.sales.by_year.is_empty() {
            writeln!(f, "  {}", p.dim("No dated sales"))?;
        }
        for (year, amount) in &d.sales.by_year {
            writeln!(f, "  {}  {:>16}", year, money(*amount))?;
        }
        Ok(())
    }
}

pub struct ChatEntryView<'a> {
    pub entry: &'a ChatEntry,
    pub palette: Palette,
}

impl fmt::Display for ChatEntryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entry.role {
            ChatRole::Question => write!(f, "{} {}", self.palette.dim("you:"), self.entry.text),
            ChatRole::Answer => write!(f, "{} {}", self.palette.accent("bot:"), self.entry.text),
        }
    }
}
