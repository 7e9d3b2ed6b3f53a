//! Server-side rendering for the registry UI.
//!
//! All markup the browser displays is produced here: table rows with
//! masked CPFs, the two distinguishable empty states, and the page shell.
//! The page's inline script never formats data itself; it only swaps in
//! fragments rendered by this module and toggles between the pre-rendered
//! masked/revealed CPF strings carried in row data attributes.

mod format;

pub use format::{escape_html, format_cpf, format_date, format_timestamp, mask_cpf};

use crate::client::Client;

/// Number of columns in the results table (for empty-state colspan).
const TABLE_COLUMNS: usize = 7;

/// The embedded single-page UI.
const PAGE_TEMPLATE: &str = include_str!("../../assets/page.html");

/// Render the full UI page.
///
/// The results area starts out with the prompt placeholder; rows are
/// fetched as fragments once the user searches.
#[must_use]
pub fn render_page() -> String {
    PAGE_TEMPLATE.replace("<!--ROWS-->", &prompt_fragment())
}

/// Render the table body for a search result.
///
/// Zero matches render the no-results placeholder, which is textually
/// distinct from the pre-search prompt.
#[must_use]
pub fn render_results(clients: &[Client]) -> String {
    if clients.is_empty() {
        return no_results_fragment();
    }
    clients.iter().map(render_row).collect()
}

/// Placeholder shown before any search has been performed.
#[must_use]
pub fn prompt_fragment() -> String {
    empty_row("Pesquise para ver resultados (nome, CPF ou telefone).")
}

/// Placeholder shown when a search matched nothing.
#[must_use]
pub fn no_results_fragment() -> String {
    empty_row("Nenhum resultado encontrado.")
}

fn empty_row(message: &str) -> String {
    format!(r#"<tr class="empty"><td colspan="{TABLE_COLUMNS}">{message}</td></tr>"#)
}

/// Render one client as a table row.
///
/// The CPF cell carries both the masked and the canonically formatted
/// string in data attributes; the reveal toggle swaps between them
/// without another round trip. Both are escaped here, and the row starts
/// masked on every render.
fn render_row(client: &Client) -> String {
    let id = client.id.unwrap_or_default();
    let cpf = client.cpf.as_deref().unwrap_or_default();
    let masked = escape_html(&mask_cpf(cpf));
    let revealed = escape_html(&format_cpf(cpf));

    let eye = if cpf.is_empty() {
        String::new()
    } else {
        r#"<button class="eye" type="button" title="Mostrar/ocultar CPF">&#128065;</button>"#
            .to_string()
    };

    let birth = client
        .date_of_birth
        .as_deref()
        .map(format_date)
        .unwrap_or_default();

    format!(
        concat!(
            r#"<tr>"#,
            r#"<td>{name}</td>"#,
            r#"<td><span class="cpf" data-masked="{masked}" data-revealed="{revealed}">{masked}</span>{eye}</td>"#,
            r#"<td>{phone}</td>"#,
            r#"<td>{birth}</td>"#,
            r#"<td>{notes}</td>"#,
            r#"<td>{created}</td>"#,
            r#"<td><button class="remove" type="button" data-id="{id}">Remover</button></td>"#,
            r#"</tr>"#,
        ),
        name = escape_html(&client.name),
        masked = masked,
        revealed = revealed,
        eye = eye,
        phone = escape_html(client.phone.as_deref().unwrap_or_default()),
        birth = escape_html(&birth),
        notes = escape_html(client.notes.as_deref().unwrap_or_default()),
        created = format_timestamp(client.created_at),
        id = id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_client() -> Client {
        Client {
            id: Some(3),
            name: "Ana Silva".to_string(),
            cpf: Some("12345678901".to_string()),
            phone: Some("(11) 99999-0000".to_string()),
            notes: Some("vip".to_string()),
            date_of_birth: Some("1990-05-03".to_string()),
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_render_row_masks_cpf_by_default() {
        let html = render_results(&[sample_client()]);
        assert!(html.contains(">12345••••••</span>"));
        assert!(html.contains(r#"data-revealed="123.456.789-01""#));
    }

    #[test]
    fn test_render_row_formats_dates() {
        let html = render_results(&[sample_client()]);
        assert!(html.contains("<td>03/05/1990</td>"));
        assert!(html.contains("<td>15/01/2024 10:30</td>"));
    }

    #[test]
    fn test_render_row_escapes_user_fields() {
        let mut client = sample_client();
        client.name = "<script>alert(1)</script>".to_string();
        client.notes = Some(r#"a "quote" & more"#.to_string());

        let html = render_results(&[client]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&quot;quote&quot; &amp; more"));
    }

    #[test]
    fn test_render_row_without_cpf_has_no_eye_toggle() {
        let mut client = sample_client();
        client.cpf = None;

        let html = render_results(&[client]);
        assert!(!html.contains(r#"class="eye""#));
    }

    #[test]
    fn test_render_row_carries_delete_id() {
        let html = render_results(&[sample_client()]);
        assert!(html.contains(r#"data-id="3""#));
    }

    #[test]
    fn test_empty_states_are_distinct() {
        let prompt = prompt_fragment();
        let no_results = no_results_fragment();

        assert_ne!(prompt, no_results);
        assert!(prompt.contains("Pesquise"));
        assert!(no_results.contains("Nenhum resultado"));
    }

    #[test]
    fn test_render_results_empty_shows_no_results() {
        assert_eq!(render_results(&[]), no_results_fragment());
    }

    #[test]
    fn test_render_page_contains_prompt() {
        let page = render_page();
        assert!(page.contains("Pesquise para ver resultados"));
        assert!(page.contains("<!doctype html>"));
    }

    #[test]
    fn test_render_multiple_rows() {
        let mut second = sample_client();
        second.id = Some(4);
        second.name = "Bruno".to_string();

        let html = render_results(&[sample_client(), second]);
        assert_eq!(html.matches("<tr>").count(), 2);
        assert!(html.contains("Ana Silva"));
        assert!(html.contains("Bruno"));
    }
}
