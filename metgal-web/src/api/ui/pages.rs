//! Page rendering
//!
//! Plain `format!` templates. Every value that comes from the collection API
//! or the request goes through [`escape_html`].

use metgal_common::{Department, DisplayRecord, FilterCriteria, ObjectId};

use super::escape_html;
use crate::services::GalleryPage;

const SITE_TITLE: &str = "Museo Metropolitano de Arte";

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/gallery.css">
</head>
<body>
{body}
    <script src="/static/main.js"></script>
</body>
</html>
"#,
        title = escape_html(title),
        body = body,
    )
}

fn department_options(departments: &[Department], selected: Option<&str>) -> String {
    let mut options = String::from(r#"<option value="">Todos los departamentos</option>"#);
    for dept in departments {
        let value = dept.department_id.to_string();
        let selected_attr = if selected == Some(value.as_str()) {
            " selected"
        } else {
            ""
        };
        options.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            value,
            selected_attr,
            escape_html(&dept.display_name)
        ));
    }
    options
}

fn filter_form(departments: &[Department], criteria: &FilterCriteria, limit: usize) -> String {
    format!(
        r#"<form class="filters" action="/filtrar" method="get">
            <select name="department">{options}</select>
            <input type="text" name="keyword" placeholder="Palabra clave" value="{keyword}">
            <input type="text" name="location" placeholder="Localización" value="{location}">
            <input type="hidden" name="limit" value="{limit}">
            <button type="submit">Filtrar</button>
        </form>"#,
        options = department_options(departments, criteria.department.as_deref()),
        keyword = escape_html(criteria.keyword.as_deref().unwrap_or("")),
        location = escape_html(criteria.geolocation.as_deref().unwrap_or("")),
        limit = limit,
    )
}

fn card(record: &DisplayRecord) -> String {
    let image = match &record.image_url {
        Some(url) => format!(
            r#"<img class="image" src="{}" alt="{}" loading="lazy">"#,
            escape_html(url),
            escape_html(&record.title)
        ),
        None => r#"<div class="no-image">Sin imagen</div>"#.to_string(),
    };

    let more = if record.more_images.is_some() {
        format!(
            r#"<a class="more" href="/moreImg/{}">Ver más imágenes</a>"#,
            record.id
        )
    } else {
        String::new()
    };

    format!(
        r#"<article class="card">
            {image}
            <h2>{title}</h2>
            <p>Cultura: {culture}</p>
            <p>Dinastía: {dynasty}</p>
            <p class="date hidden">{date}</p>
            {more}
        </article>"#,
        image = image,
        title = escape_html(&record.title),
        culture = escape_html(&record.culture),
        dynasty = escape_html(&record.dynasty),
        date = escape_html(&record.date),
        more = more,
    )
}

fn pager(page: &GalleryPage) -> String {
    let window = page.window;
    let mut links = String::new();

    if window.has_prev() {
        links.push_str(&format!(
            r#"<a href="/?page={}&amp;limit={}">&laquo; Anterior</a>"#,
            window.page - 1,
            window.limit
        ));
    }
    links.push_str(&format!(
        "<span>Página {} de {}</span>",
        window.page,
        window.total_pages(page.total).max(1)
    ));
    if window.has_next(page.total) {
        links.push_str(&format!(
            r#"<a href="/?page={}&amp;limit={}">Siguiente &raquo;</a>"#,
            window.page + 1,
            window.limit
        ));
    }

    format!(r#"<nav class="pager">{}</nav>"#, links)
}

/// Gallery listing, used by both `/` and `/filtrar`
pub fn gallery_page(page: &GalleryPage) -> String {
    let mut body = format!(
        r#"<header>
        <h1><a href="/">{}</a></h1>
        {}
    </header>
"#,
        SITE_TITLE,
        filter_form(&page.departments, &page.criteria, page.window.limit)
    );

    if page.degraded.is_some() {
        body.push_str(
            r#"<p class="notice">La búsqueda no está disponible en este momento.</p>"#,
        );
    } else if page.records.is_empty() {
        body.push_str(r#"<p class="notice">No se encontraron objetos.</p>"#);
    }

    body.push_str(r#"<main class="gallery">"#);
    for record in &page.records {
        body.push_str(&card(record));
    }
    body.push_str("</main>");
    body.push_str(&pager(page));

    layout(SITE_TITLE, &body)
}

/// Detail view listing an object's additional images
pub fn detail_page(id: ObjectId, records: &[DisplayRecord]) -> String {
    let mut body = format!(
        r#"<header><h1><a href="/">{}</a></h1></header>"#,
        SITE_TITLE
    );

    let Some(record) = records.first() else {
        body.push_str(&format!(
            r#"<p class="notice">No se pudo obtener el objeto {}.</p>"#,
            id
        ));
        return layout(SITE_TITLE, &body);
    };

    body.push_str(&format!(
        r#"<section class="detail">
        <h2>{title}</h2>
        <p>Cultura: {culture}</p>
        <p>Dinastía: {dynasty}</p>
        <p>Fecha: {date}</p>
    </section>"#,
        title = escape_html(&record.title),
        culture = escape_html(&record.culture),
        dynasty = escape_html(&record.dynasty),
        date = escape_html(&record.date),
    ));

    body.push_str(r#"<main class="images">"#);
    let images = record
        .image_url
        .iter()
        .chain(record.more_images.iter().flatten());
    for url in images {
        body.push_str(&format!(
            r#"<img src="{}" alt="{}" loading="lazy">"#,
            escape_html(url),
            escape_html(&record.title)
        ));
    }
    body.push_str("</main>");

    layout(&record.title, &body)
}

/// Error view (404)
pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        r#"<section class="error">
        <h1>{}</h1>
        <p>{}</p>
        <p><a href="/">Volver a la galería</a></p>
    </section>"#,
        escape_html(title),
        escape_html(message)
    );
    layout(title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PageWindow;

    fn display(id: ObjectId, title: &str) -> DisplayRecord {
        DisplayRecord {
            id,
            image_url: Some(format!("https://images.metmuseum.org/{}.jpg", id)),
            title: title.to_string(),
            culture: "Japón".to_string(),
            dynasty: "Sin datos de dinastía".to_string(),
            more_images: None,
            date: "1700".to_string(),
        }
    }

    fn page_with(records: Vec<DisplayRecord>, window: PageWindow, total: usize) -> GalleryPage {
        GalleryPage {
            departments: vec![Department {
                department_id: 6,
                display_name: "Asian Art".to_string(),
            }],
            records,
            window,
            total,
            criteria: FilterCriteria::new(Some("6".into()), Some("<vase>".into()), None),
            degraded: None,
        }
    }

    #[test]
    fn test_gallery_page_renders_cards_and_form() {
        let html = gallery_page(&page_with(
            vec![display(1, "Codorniz"), display(2, "Casco")],
            PageWindow::new(1, 2),
            5,
        ));

        assert!(html.contains("Codorniz"));
        assert!(html.contains("Casco"));
        assert!(html.contains(r#"<option value="6" selected>Asian Art</option>"#));
        assert!(html.contains("&lt;vase&gt;"));
        assert!(!html.contains("<vase>"));
        assert!(html.contains(r#"href="/?page=2&amp;limit=2""#));
        assert!(!html.contains("Anterior"));
    }

    #[test]
    fn test_gallery_page_more_images_link() {
        let mut record = display(9, "Jarrón");
        record.more_images = Some(vec!["https://images.metmuseum.org/9b.jpg".to_string()]);
        let html = gallery_page(&page_with(vec![record], PageWindow::new(2, 1), 2));

        assert!(html.contains(r#"href="/moreImg/9""#));
        assert!(html.contains("Anterior"));
        assert!(!html.contains("Siguiente"));
    }

    #[test]
    fn test_gallery_page_empty_notice() {
        let html = gallery_page(&page_with(Vec::new(), PageWindow::new(1, 20), 0));
        assert!(html.contains("No se encontraron objetos."));
    }

    #[test]
    fn test_detail_page_lists_all_images() {
        let mut record = display(3, "Armadura");
        record.more_images = Some(vec![
            "https://images.metmuseum.org/3b.jpg".to_string(),
            "https://images.metmuseum.org/3c.jpg".to_string(),
        ]);
        let html = detail_page(3, &[record]);

        assert!(html.contains("3.jpg"));
        assert!(html.contains("3b.jpg"));
        assert!(html.contains("3c.jpg"));
        assert!(html.contains("<title>Armadura</title>"));
    }

    #[test]
    fn test_detail_page_missing_object() {
        let html = detail_page(404, &[]);
        assert!(html.contains("No se pudo obtener el objeto 404."));
    }

    #[test]
    fn test_error_page() {
        let html = error_page("error 404 Not Found", "la ruta que estas buscando no existe");
        assert!(html.contains("<h1>error 404 Not Found</h1>"));
        assert!(html.contains("la ruta que estas buscando no existe"));
    }
}
