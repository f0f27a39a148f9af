use super::print_json;
use crate::error::TaskmasterError;

use client_core::{ListQuery, TaskmasterClient};

use std::io::Write;

use serde_json::{Value, json};

/// Tasks from a list response: the paginated `{items, ...}` shape or a bare
/// array.
pub fn task_items(response: &Value) -> &[Value] {
    response
        .get("items")
        .unwrap_or(response)
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// `#<id>  <title>` plus ` - <description>` when there is one.
pub fn format_task(task: &Value) -> String {
    let id = match task.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Null) | None => "?".to_string(),
        Some(other) => other.to_string(),
    };
    let title = task.get("title").and_then(Value::as_str).unwrap_or_default();

    match task
        .get("description")
        .and_then(Value::as_str)
        .filter(|d| !d.is_empty())
    {
        Some(description) => format!("#{id}  {title} - {description}"),
        None => format!("#{id}  {title}"),
    }
}

pub async fn list(
    client: &TaskmasterClient,
    page: u32,
    limit: u32,
    query: Option<&str>,
    json: bool,
    out: &mut impl Write,
) -> Result<(), TaskmasterError> {
    let mut list_query = ListQuery::default().with_page(page).with_limit(limit);
    if let Some(q) = query {
        list_query = list_query.with_search(q);
    }

    let response = client.get_notes(&list_query).await?;

    if json {
        return print_json(&response, out);
    }

    let items = task_items(&response);
    if items.is_empty() {
        writeln!(out, "No tasks found")?;
    }
    for task in items {
        writeln!(out, "{}", format_task(task))?;
    }

    if let (Some(page), Some(pages), Some(total)) = (
        response.get("page").and_then(Value::as_u64),
        response.get("pages").and_then(Value::as_u64),
        response.get("total").and_then(Value::as_u64),
    ) {
        writeln!(out, "Page {page} of {pages} ({total} total)")?;
    }
    Ok(())
}

pub async fn create(
    client: &TaskmasterClient,
    title: &str,
    description: Option<&str>,
    json: bool,
    out: &mut impl Write,
) -> Result<(), TaskmasterError> {
    let task = client.create_note(title, description).await?;

    if json {
        print_json(&task, out)
    } else {
        writeln!(out, "Created {}", format_task(&task))?;
        Ok(())
    }
}

pub async fn delete(
    client: &TaskmasterClient,
    id: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<(), TaskmasterError> {
    let deleted = client.delete_note(id).await?;

    if json {
        print_json(&json!({ "deleted": deleted, "id": id }), out)
    } else {
        writeln!(out, "Deleted task #{id}")?;
        Ok(())
    }
}
