//! Server-rendered HTML pages.

use chrono::NaiveDate;
use url::form_urlencoded;

use crate::flash::Flash;
use crate::forms::{error_for, ComputerForm, FieldError};
use crate::models::company::Company;
use crate::models::computer::ComputerListing;
use crate::paging::{Page, PageRequest, SortColumn, SortOrder};

const LAYOUT: &str = include_str!("../templates/layout.html");

/// Escape text for HTML bodies and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, content: &str) -> String {
    LAYOUT
        .replace("{{title}}", &escape(title))
        .replace("{{content}}", content)
}

/// URL of a list page with the given parameters.
pub fn list_url(page: u32, sort: SortColumn, order: SortOrder, filter: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("page", &page.to_string())
        .append_pair("sortBy", sort.as_param())
        .append_pair("order", order.as_param())
        .append_pair("filter", filter)
        .finish();
    format!("/computers?{query}")
}

fn display_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%d %b %Y").to_string(),
        None => "<em>-</em>".to_string(),
    }
}

fn flash_banner(flash: Option<&Flash>) -> String {
    match flash {
        Some(flash) => format!(
            "<div class=\"alert-success\"><strong>Done!</strong> {}</div>\n",
            escape(&flash.message)
        ),
        None => String::new(),
    }
}

fn header_cell(request: &PageRequest, column: SortColumn) -> String {
    let sorted = request.sort == column;
    // Clicking the active column flips its order; any other starts ascending.
    let order = if sorted {
        request.order.reversed()
    } else {
        SortOrder::Asc
    };
    let arrow = match (sorted, request.order) {
        (true, SortOrder::Asc) => " &#9650;",
        (true, SortOrder::Desc) => " &#9660;",
        (false, _) => "",
    };
    format!(
        "<th{}><a href=\"{}\">{}</a>{arrow}</th>",
        if sorted { " class=\"sorted\"" } else { "" },
        escape(&list_url(0, column, order, &request.filter)),
        column.label()
    )
}

/// The paginated, sortable, filterable computer list.
pub fn list_page(
    page: &Page<ComputerListing>,
    request: &PageRequest,
    flash: Option<&Flash>,
) -> String {
    let mut html = String::new();

    html.push_str(&format!(
        "<h1>{}</h1>\n",
        match page.total {
            0 => "No computers".to_string(),
            1 => "One computer found".to_string(),
            n => format!("{n} computers found"),
        }
    ));
    html.push_str(&flash_banner(flash));

    html.push_str(&format!(
        "<div class=\"actions\">\
         <form action=\"/computers\" method=\"get\">\
         <input type=\"hidden\" name=\"sortBy\" value=\"{}\">\
         <input type=\"hidden\" name=\"order\" value=\"{}\">\
         <input type=\"search\" name=\"filter\" value=\"{}\" placeholder=\"Filter by computer name...\">\
         <button type=\"submit\">Filter by name</button>\
         </form>\
         <a href=\"/computers/new\">Add a new computer</a>\
         </div>\n",
        request.sort.as_param(),
        request.order.as_param(),
        escape(&request.filter)
    ));

    if page.items.is_empty() {
        html.push_str("<p><em>Nothing to display</em></p>\n");
    } else {
        html.push_str("<table>\n<thead><tr>");
        for column in SortColumn::ALL {
            html.push_str(&header_cell(request, column));
        }
        html.push_str("</tr></thead>\n<tbody>\n");

        for row in &page.items {
            let computer = &row.computer;
            html.push_str(&format!(
                "<tr><td><a href=\"/computers/{}\">{}</a></td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                computer.id,
                escape(&computer.name),
                display_date(computer.introduced),
                display_date(computer.discontinued),
                match &row.company_name {
                    Some(name) => escape(name),
                    None => "<em>-</em>".to_string(),
                }
            ));
        }
        html.push_str("</tbody>\n</table>\n");
    }

    html.push_str("<ul class=\"pagination\">");
    if page.has_previous() {
        html.push_str(&format!(
            "<li><a href=\"{}\">&larr; Previous</a></li>",
            escape(&list_url(
                page.page - 1,
                request.sort,
                request.order,
                &request.filter
            ))
        ));
    } else {
        html.push_str("<li class=\"disabled\">&larr; Previous</li>");
    }
    html.push_str(&format!(
        "<li>Displaying {} to {} of {}</li>",
        page.first_row(),
        page.last_row(),
        page.total
    ));
    if page.has_next() {
        html.push_str(&format!(
            "<li><a href=\"{}\">Next &rarr;</a></li>",
            escape(&list_url(
                page.page + 1,
                request.sort,
                request.order,
                &request.filter
            ))
        ));
    } else {
        html.push_str("<li class=\"disabled\">Next &rarr;</li>");
    }
    html.push_str("</ul>\n");

    layout("Computers database", &html)
}

fn text_field(
    form_errors: &[FieldError],
    field: &str,
    label: &str,
    value: &str,
    help: &str,
) -> String {
    let error = error_for(form_errors, field);
    format!(
        "<div class=\"field{}\"><label for=\"{field}\">{label}</label>\
         <input type=\"text\" id=\"{field}\" name=\"{field}\" value=\"{}\">\
         <span class=\"help\">{help}</span>{}</div>\n",
        if error.is_some() { " invalid" } else { "" },
        escape(value),
        error
            .map(|e| format!("<span class=\"error\">{}</span>", escape(e)))
            .unwrap_or_default()
    )
}

fn company_select(form_errors: &[FieldError], selected: &str, companies: &[Company]) -> String {
    let error = error_for(form_errors, "company");
    let mut html = format!(
        "<div class=\"field{}\"><label for=\"company\">Company</label>\
         <select id=\"company\" name=\"company\">\
         <option value=\"\">-- Choose a company --</option>",
        if error.is_some() { " invalid" } else { "" }
    );
    for company in companies {
        let id = company.id.to_string();
        html.push_str(&format!(
            "<option value=\"{id}\"{}>{}</option>",
            if id == selected.trim() { " selected" } else { "" },
            escape(&company.name)
        ));
    }
    html.push_str("</select>");
    if let Some(e) = error {
        html.push_str(&format!("<span class=\"error\">{}</span>", escape(e)));
    }
    html.push_str("</div>\n");
    html
}

fn form_fields(form: &ComputerForm, errors: &[FieldError], companies: &[Company]) -> String {
    let mut html = String::new();
    html.push_str(&text_field(errors, "name", "Computer name", &form.name, "Required"));
    html.push_str(&text_field(
        errors,
        "introduced",
        "Introduced date",
        &form.introduced,
        "Date (yyyy-MM-dd)",
    ));
    html.push_str(&text_field(
        errors,
        "discontinued",
        "Discontinued date",
        &form.discontinued,
        "Date (yyyy-MM-dd)",
    ));
    html.push_str(&company_select(errors, &form.company, companies));
    html
}

/// Empty or redisplayed "add a computer" form.
pub fn create_page(form: &ComputerForm, errors: &[FieldError], companies: &[Company]) -> String {
    let content = format!(
        "<h1>Add a computer</h1>\n\
         <form action=\"/computers\" method=\"post\">\n{}\
         <div class=\"actions\"><button type=\"submit\">Create this computer</button> or \
         <a href=\"/computers\">Cancel</a></div>\n</form>\n",
        form_fields(form, errors, companies)
    );
    layout("Add a computer", &content)
}

/// Edit form for an existing computer, with its delete button.
pub fn edit_page(
    id: i64,
    form: &ComputerForm,
    errors: &[FieldError],
    companies: &[Company],
) -> String {
    let content = format!(
        "<h1>Edit computer</h1>\n\
         <form action=\"/computers/{id}\" method=\"post\">\n{}\
         <div class=\"actions\"><button type=\"submit\">Save this computer</button> or \
         <a href=\"/computers\">Cancel</a></div>\n</form>\n\
         <form class=\"delete\" action=\"/computers/{id}/delete\" method=\"post\">\
         <button type=\"submit\">Delete this computer</button></form>\n",
        form_fields(form, errors, companies)
    );
    layout("Edit computer", &content)
}

pub fn error_page(title: &str, message: &str) -> String {
    let content = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/computers\">Back to the list</a></p>\n",
        escape(title),
        escape(message)
    );
    layout(title, &content)
}
