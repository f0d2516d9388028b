use super::{HandlerContext, ensure};
use crate::args::{FieldArgs, ListArgs, OutputFormat, ResourceCommand};
use crate::presentation::views::{FieldListView, RecordView};
use crate::presentation::{TableView, TableViewModel, print_json};
use anyhow::Result;
use bisoshi_api::Transport;
use bisoshi_runtime::{Completion, ListController};
use bisoshi_sdk::{Client, Error};
use bisoshi_types::{RecordId, Resource, Row, SortDirection};
use log::warn;
use serde_json::json;

/// CRUD commands shared by every entity list.
pub async fn handle<R, T>(client: &Client<T>, command: ResourceCommand, ctx: &HandlerContext) -> Result<()>
where
    R: Resource,
    T: Transport + Clone,
{
    let spec = R::spec();
    let mut list = client.list::<R>();

    match command {
        ResourceCommand::Fields => print!("{}", FieldListView { spec }),

        ResourceCommand::List(args) => {
            if let Some(rows) = args.rows_per_page {
                list.view_mut().set_rows_per_page(rows as usize);
            }
            load(&mut list).await?;
            apply_list_args(&mut list, &args)?;
            render_list(&list, args.all, ctx)?;
        }

        ResourceCommand::Show { id } => {
            load(&mut list).await?;
            let id = RecordId::from(id);
            let row = list
                .view()
                .find(&id)
                .ok_or_else(|| Error::NotFound(format!("{} '{}'", spec.kind, id)))?;
            if ctx.is_json() {
                print_json(row)?;
            } else {
                print!(
                    "{}",
                    RecordView {
                        spec,
                        row,
                        palette: ctx.palette,
                    }
                );
            }
        }

        ResourceCommand::Create(fields) => {
            list.open_create();
            fill_form(&mut list, &fields)?;
            submit(&mut list).await?;

            let created = list.view().records().last().ok_or_else(|| {
                Error::Internal(anyhow::anyhow!("backend returned no {}", spec.kind))
            })?;
            report_saved::<R>(created, "Created", ctx)?;
        }

        ResourceCommand::Update { id, fields } => {
            load(&mut list).await?;
            let id = RecordId::from(id);
            list.open_edit(&id).map_err(Error::from)?;
            fill_form(&mut list, &fields)?;
            submit(&mut list).await?;

            let updated = list
                .view()
                .find(&id)
                .ok_or_else(|| Error::NotFound(format!("{} '{}'", spec.kind, id)))?;
            report_saved::<R>(updated, "Updated", ctx)?;
        }

        ResourceCommand::Delete { ids } => {
            load(&mut list).await?;
            for raw in &ids {
                let id = RecordId::from(raw.as_str());
                if list.view().find(&id).is_none() {
                    return Err(Error::NotFound(format!("{} '{}'", spec.kind, id)).into());
                }
                if !list.view().table().is_selected(&id) {
                    list.view_mut().toggle_select(&id);
                }
            }

            let mut deleted = Vec::new();
            for id in list.selected_ids() {
                let completion = list.delete(&id).await;
                finish(&mut list, completion).await?;
                if !ctx.is_json() {
                    println!("Deleted {} {}", spec.kind, id);
                }
                deleted.push(id);
            }
            if ctx.is_json() {
                print_json(&json!({ "deleted": deleted }))?;
            }
        }
    }
    Ok(())
}

async fn load<R: Resource, T: Transport>(list: &mut ListController<R, T>) -> Result<()> {
    let completion = list.refresh().await;
    finish(list, completion).await
}

async fn submit<R: Resource, T: Transport>(list: &mut ListController<R, T>) -> Result<()> {
    let completion = list.submit().await.map_err(Error::from)?;
    finish(list, completion).await
}

/// Retry a failed request once when the failure looks transient.
async fn finish<R: Resource, T: Transport>(
    list: &mut ListController<R, T>,
    completion: Completion,
) -> Result<()> {
    let transient = completion == Completion::Failed
        && list.error().is_some_and(|e| e.error.is_retryable());

    let completion = if transient {
        warn!("[{}] request failed, retrying once", R::spec().kind);
        list.retry()
            .await
            .map_err(Error::from)?
            .unwrap_or(Completion::Failed)
    } else {
        completion
    };
    ensure(completion, list)?;
    Ok(())
}

fn fill_form<R: Resource, T: Transport>(
    list: &mut ListController<R, T>,
    fields: &FieldArgs,
) -> Result<()> {
    let spec = R::spec();
    if fields.fields.is_empty() {
        return Err(Error::InvalidInput(format!(
            "no fields given (see `bisoshi {} fields`)",
            spec.kind
        ))
        .into());
    }
    for (name, value) in &fields.fields {
        list.set_form_field(name, value).map_err(Error::from)?;
    }
    Ok(())
}

fn apply_list_args<R: Resource, T: Transport>(
    list: &mut ListController<R, T>,
    args: &ListArgs,
) -> Result<()> {
    let spec = R::spec();
    let view = list.view_mut();

    if let Some(filter) = &args.filter {
        view.set_filter(filter.as_str());
    }
    if let Some(field) = &args.sort {
        if spec.column(field).is_none() {
            let known: Vec<&str> = spec.columns.iter().map(|c| c.id).collect();
            return Err(Error::InvalidInput(format!(
                "unknown column '{}' (expected one of: {})",
                field,
                known.join(", ")
            ))
            .into());
        }
        let order = args.order.map(SortDirection::from).unwrap_or_default();
        view.sort_by(field, order);
    }

    if !args.all {
        let page = args.page as usize;
        let page_count = view.page_count();
        if page > page_count {
            return Err(Error::InvalidInput(format!(
                "page {} is past the last page ({})",
                page, page_count
            ))
            .into());
        }
        view.set_page(page - 1);
    }
    Ok(())
}

fn render_list<R: Resource, T: Transport>(
    list: &ListController<R, T>,
    all: bool,
    ctx: &HandlerContext,
) -> Result<()> {
    let model = TableViewModel::build::<R>(list.view(), all)?;
    match ctx.format {
        OutputFormat::Plain => print!("{}", TableView::new(&model, ctx.palette)),
        OutputFormat::Json => print_json(&model)?,
        OutputFormat::Csv => model.write_csv(std::io::stdout().lock())?,
    }
    Ok(())
}

fn report_saved<R: Resource>(row: &R::Row, verb: &str, ctx: &HandlerContext) -> Result<()> {
    if ctx.is_json() {
        print_json(row)?;
    } else {
        println!("{} {} {}", ctx.palette.good(verb), R::spec().kind, row.row_id());
    }
    Ok(())
}
