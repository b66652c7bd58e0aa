// File: src/views.rs
// Purpose: Maud pages for the item list, detail and forms

use crate::domain::Item;
use crate::form_context::FormContext;
use maud::{html, Markup, DOCTYPE};

/// Inputs on the add form; the add form never shows `id`
const ADD_INPUTS: &[&str] = &["itemName", "price", "quantity"];

const STYLE: &str = "
body { font-family: sans-serif; max-width: 560px; margin: 2rem auto; }
.field-error { border-color: #dc3545; color: #dc3545; }
.global-error { color: #dc3545; font-weight: bold; }
.status { color: #198754; }
label { display: block; margin-top: 1rem; }
";

/// Full HTML page around `body`
pub fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (STYLE) }
            }
            body {
                (body)
            }
        }
    }
}

pub fn items_page(base: &str, items: &[Item]) -> Markup {
    page(
        "Items",
        html! {
            h2 { "Items" }
            a href={ (base) "/add" } { "Add item" }
            table {
                thead {
                    tr { th { "ID" } th { "Name" } th { "Price" } th { "Quantity" } }
                }
                tbody {
                    @for item in items {
                        @let id = item.id.unwrap_or_default();
                        tr {
                            td { a href={ (base) "/" (id) } { (id) } }
                            td { a href={ (base) "/" (id) } { (item.item_name) } }
                            td { (item.price) }
                            td { (item.quantity) }
                        }
                    }
                }
            }
        },
    )
}

/// Detail view; `saved` shows the one-time success banner after a create
pub fn item_page(base: &str, item: &Item, saved: bool) -> Markup {
    let id = item.id.unwrap_or_default();
    page(
        "Item",
        html! {
            h2 { "Item" }
            @if saved {
                p.status { "Saved." }
            }
            dl {
                dt { "ID" } dd { (id) }
                dt { "Name" } dd { (item.item_name) }
                dt { "Price" } dd { (item.price) }
                dt { "Quantity" } dd { (item.quantity) }
            }
            a href={ (base) "/" (id) "/edit" } { "Edit" }
            " "
            a href=(base) { "Back to list" }
        },
    )
}

pub fn add_form_page(base: &str, form: &FormContext) -> Markup {
    page(
        "Add item",
        html! {
            h2 { "Add item" }
            form method="post" action={ (base) "/add" } {
                (global_errors(form))
                (unplaced_errors(form, ADD_INPUTS))
                (input_field(form, "itemName", "Name"))
                (input_field(form, "price", "Price"))
                (input_field(form, "quantity", "Quantity"))
                button type="submit" { "Save" }
                " "
                a href=(base) { "Cancel" }
            }
        },
    )
}

pub fn edit_form_page(base: &str, id: i64, form: &FormContext) -> Markup {
    page(
        "Edit item",
        html! {
            h2 { "Edit item" }
            form method="post" action={ (base) "/" (id) "/edit" } {
                (global_errors(form))
                label for="id" { "ID" }
                input class=[form.has_error("id").then_some("field-error")]
                    id="id" type="text" name="id" value=(form.value("id")) readonly;
                (field_errors(form, "id"))
                (input_field(form, "itemName", "Name"))
                (input_field(form, "price", "Price"))
                (input_field(form, "quantity", "Quantity"))
                button type="submit" { "Save" }
                " "
                a href={ (base) "/" (id) } { "Cancel" }
            }
        },
    )
}

pub fn not_found_page(message: &str) -> Markup {
    page(
        "Not found",
        html! {
            h2 { "404 Not Found" }
            p { (message) }
        },
    )
}

pub fn error_page(message: &str) -> Markup {
    page(
        "Server error",
        html! {
            h2 { "500 Internal Server Error" }
            p { (message) }
        },
    )
}

fn global_errors(form: &FormContext) -> Markup {
    html! {
        @for message in form.global_errors() {
            p.global-error { (message) }
        }
    }
}

fn input_field(form: &FormContext, name: &str, label: &str) -> Markup {
    html! {
        label for=(name) { (label) }
        input class=[form.has_error(name).then_some("field-error")]
            id=(name) type="text" name=(name) value=(form.value(name));
        (field_errors(form, name))
    }
}

fn field_errors(form: &FormContext, name: &str) -> Markup {
    html! {
        @for message in form.errors_for(name) {
            div.field-error { (message) }
        }
    }
}

/// Errors on submitted fields the page has no input for
fn unplaced_errors(form: &FormContext, inputs: &[&str]) -> Markup {
    html! {
        @for (field, message) in form.errors_outside(inputs) {
            p.field-error data-field=(field) { (message) }
        }
    }
}
