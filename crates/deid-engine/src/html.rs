//! Minimal HTML document shell for redacted output

use std::sync::LazyLock;

use deid_core::substitute::{ENTITY_CLASS, PRONOUN_CLASS, escape_html};
use regex::Regex;

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

/// Convert line breaks to `<br>` and wrap `body` in a standalone document.
///
/// `body` is inserted as is: it must be output of an HTML-mode substitution,
/// which escapes the message text and adds the markers. `title` is escaped here.
pub fn wrap_document(body: &str, title: &str) -> String {
    let body = LINE_BREAK.replace_all(body, "<br>\n");
    let title = escape_html(title);
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>\n\
         .{ENTITY_CLASS} {{ background-color: #ffe08a; font-weight: bold; }}\n\
         .{PRONOUN_CLASS} {{ background-color: #bde0fe; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         {body}\n\
         </body>\n\
         </html>\n"
    )
}
