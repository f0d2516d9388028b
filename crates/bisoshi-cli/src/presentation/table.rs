use super::format;
use super::style::Palette;
use bisoshi_engine::ListView;
use bisoshi_types::{Resource, Row};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct ColumnHeader {
    pub id: &'static str,
    pub label: &'static str,
}

/// One rendered page of a list view.
#[derive(Debug, Clone, Serialize)]
pub struct TableViewModel {
    pub title: &'static str,
    pub columns: Vec<ColumnHeader>,
    /// Records on the page, as the backend sent them.
    pub rows: Vec<serde_json::Value>,
    #[serde(skip)]
    pub cells: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// 1-based.
    pub page: usize,
    pub page_count: usize,
    /// Rows matching the filter, across all pages.
    pub total: usize,
    pub filler_rows: usize,
    pub not_found: bool,
}

impl TableViewModel {
    /// Current page of `view`; every filtered row when `all` is set.
    pub fn build<R>(view: &ListView<R::Row>, all: bool) -> anyhow::Result<Self>
    where
        R: Resource,
    {
        let spec = R::spec();
        let filtered = view.filtered();
        let page_rows = if all { filtered.clone() } else { view.visible() };

        let rows = page_rows
            .iter()
            .map(|row| serde_json::to_value(row))
            .collect::<Result<Vec<_>, _>>()?;
        let cells = page_rows
            .iter()
            .map(|row| {
                spec.columns
                    .iter()
                    .map(|col| format::cell(row.field(col.id), col.format))
                    .collect()
            })
            .collect();

        let table = view.table();
        Ok(Self {
            title: spec.title,
            columns: spec
                .columns
                .iter()
                .map(|c| ColumnHeader { id: c.id, label: c.label })
                .collect(),
            rows,
            cells,
            filter: (!view.filter().is_empty()).then(|| view.filter().to_string()),
            sort: table
                .order_by()
                .map(|field| format!("{} {}", field, table.order())),
            page: if all { 1 } else { table.page() + 1 },
            page_count: if all { 1 } else { view.page_count() },
            total: filtered.len(),
            filler_rows: if all { 0 } else { view.empty_rows() },
            not_found: view.not_found(),
        })
    }

    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> anyhow::Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(self.columns.iter().map(|c| c.label))?;
        for row in &self.cells {
            csv.write_record(row)?;
        }
        csv.flush()?;
        Ok(())
    }
}

pub struct TableView<'a> {
    data: &'a TableViewModel,
    palette: Palette,
}

impl<'a> TableView<'a> {
    pub fn new(data: &'a TableViewModel, palette: Palette) -> Self {
        Self { data, palette }
    }

    fn widths(&self) -> Vec<usize> {
        self.data
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.data
                    .cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(col.label.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

impl fmt::Display for TableView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data;
        writeln!(f, "{}", self.palette.header(data.title))?;

        if data.not_found {
            let filter = data.filter.as_deref().unwrap_or_default();
            return writeln!(f, "No results found for \"{}\"", filter);
        }
        if data.total == 0 {
            return writeln!(f, "{}", self.palette.dim("No records"));
        }

        let widths = self.widths();
        let header: Vec<String> = data
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| pad(col.label, *w))
            .collect();
        writeln!(f, "{}", self.palette.header(header.join("  ").trim_end()))?;
        let rule: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        writeln!(f, "{}", self.palette.dim(&"-".repeat(rule)))?;

        for row in &data.cells {
            let line: Vec<String> = row.iter().zip(&widths).map(|(c, w)| pad(c, *w)).collect();
            writeln!(f, "{}", line.join("  ").trim_end())?;
        }
        for _ in 0..data.filler_rows {
            writeln!(f)?;
        }

        let mut footer = format!(
            "Page {} of {} ({} {})",
            data.page,
            data.page_count,
            data.total,
            if data.total == 1 { "row" } else { "rows" }
        );
        if let Some(sort) = &data.sort {
            footer.push_str(&format!(", sorted by {}", sort));
        }
        writeln!(f, "{}", self.palette.dim(&footer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bisoshi_engine::TableState;
    use bisoshi_testing::fixtures;
    use bisoshi_types::{Products, SortDirection};

    fn product_view() -> ListView<bisoshi_types::Product> {
        let mut view = ListView::new(TableState::new(3));
        view.replace(fixtures::sample_products());
        view
    }

    #[test]
    fn test_renders_page_with_filler_rows() {
        let mut view = product_view();
        view.sort_by("price", SortDirection::Descending);
        view.set_page(1);

        let model = TableViewModel::build::<Products>(&view, false).unwrap();
        assert_eq!(model.filler_rows, 2);
        assert_eq!(model.rows[0]["id"], "p2");

        let rendered = TableView::new(&model, Palette::plain()).to_string();
        insta::assert_snapshot!(rendered, @r"
        Products
        Name           Quantity  Unit  Cost      Price     Category       Total Price  Total Cost  Profit
        -----------------------------------------------------------------------------------------------------
        Urea agricola  300       kg    S/. 2.00  S/. 3.00  Fertilizantes  S/. 900.00   S/. 600.00  S/. 300.00


        Page 2 of 2 (4 rows), sorted by price desc
        ");
    }

    #[test]
    fn test_filter_without_match() {
        let mut view = product_view();
        view.set_filter("zzz");
        let model = TableViewModel::build::<Products>(&view, false).unwrap();
        assert!(model.not_found);
        assert_eq!(
            TableView::new(&model, Palette::plain()).to_string(),
            "Products\nNo results found for \"zzz\"\n"
        );
    }

    #[test]
    fn test_csv_uses_labels_and_formatted_cells() {
        let mut view = product_view();
        view.set_filter("urea");
        let model = TableViewModel::build::<Products>(&view, false).unwrap();

        let mut out = Vec::new();
        model.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text.lines().next().unwrap(),
            "Name,Quantity,Unit,Cost,Price,Category,Total Price,Total Cost,Profit"
        );
        assert!(text.contains("Urea agricola,300,kg,S/. 2.00,S/. 3.00"));
    }
}
