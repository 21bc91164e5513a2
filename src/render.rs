use crate::models::chat::{ ChatMessage, Role };
use pulldown_cmark::{ html, Event, Options, Parser };

fn gfm_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

/// GitHub-flavoured Markdown to HTML. A single newline inside a paragraph becomes `<br />`.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, gfm_options()).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// HTML fragment for one conversation entry. User text is escaped verbatim, assistant text is Markdown.
pub fn render_message(message: &ChatMessage) -> String {
    let role = message.role();
    match role {
        Role::User => {
            let mut escaped = String::with_capacity(message.content().len());
            html::push_html(&mut escaped, std::iter::once(Event::Text(message.content().into())));
            format!("<div class=\"message {}\" style=\"white-space: pre-wrap\">{}</div>", role.as_str(), escaped)
        }
        Role::Assistant => {
            format!("<div class=\"message {} markdown\">{}</div>", role.as_str(), markdown_to_html(message.content()))
        }
    }
}
