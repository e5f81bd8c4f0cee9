use std::fmt::Write as _;

use crate::relay::RESULT_FILE_NAME;

/// What the page shows below the upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    /// Fresh page, nothing submitted yet.
    Idle,
    /// OCR succeeded; `href` points at the processed document.
    Complete { href: String },
    /// Processing failed with a human-readable reason.
    Failed { message: String },
}

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; max-width: 42rem; margin: 3rem auto; padding: 0 1rem; color: #222; }
h1 { font-size: 1.8rem; }
form { display: flex; flex-direction: column; gap: 0.75rem; margin: 1.5rem 0; }
.hint { color: #666; font-size: 0.9rem; }
.success { background: #e6f4ea; border: 1px solid #9ad0a6; padding: 0.75rem 1rem; border-radius: 6px; }
.error { background: #fdecea; border: 1px solid #f1a9a0; padding: 0.75rem 1rem; border-radius: 6px; }
.download { display: inline-block; margin-top: 0.75rem; padding: 0.5rem 1rem; background: #1a73e8; color: #fff; border-radius: 6px; text-decoration: none; }
";

/// Render the whole single-page UI.
pub fn render(state: &PageState) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>PDF OCR Converter</title>\n");
    let _ = writeln!(html, "<style>\n{}</style>", STYLE);
    html.push_str("</head>\n<body>\n");
    html.push_str("<h1>\u{1F4C4} PDF OCR Converter</h1>\n");
    html.push_str("<p>Upload a PDF, and I will add a text layer to it using OCR.</p>\n");
    html.push_str(
        "<form method=\"post\" action=\"/\" enctype=\"multipart/form-data\">\n\
         <label for=\"file\">Choose a PDF file</label>\n\
         <input id=\"file\" type=\"file\" name=\"file\" accept=\"application/pdf,.pdf\" required>\n\
         <button type=\"submit\">Run OCR</button>\n\
         <span class=\"hint\">Processing... This may take a moment depending on file size.</span>\n\
         </form>\n",
    );

    match state {
        PageState::Idle => {}
        PageState::Complete { href } => {
            let _ = write!(
                html,
                "<div class=\"success\">OCR Complete!<br>\n\
                 <a class=\"download\" href=\"{}\" download=\"{}\">Download OCR'd PDF</a>\n</div>\n",
                escape(href),
                RESULT_FILE_NAME
            );
        }
        PageState::Failed { message } => {
            let _ = writeln!(
                html,
                "<div class=\"error\">An error occurred: {}</div>",
                escape(message)
            );
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn escape(text: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_page_has_form_and_no_result() {
        let html = render(&PageState::Idle);
        assert!(html.contains("<title>PDF OCR Converter</title>"));
        assert!(html.contains("Upload a PDF, and I will add a text layer to it using OCR."));
        assert!(html.contains("accept=\"application/pdf,.pdf\""));
        assert!(!html.contains("OCR Complete!"));
        assert!(!html.contains("download="));
        assert!(!html.contains("An error occurred"));
    }

    #[test]
    fn complete_page_offers_fixed_download_name() {
        let html = render(&PageState::Complete {
            href: "data:application/pdf;base64,JVBERg==".into(),
        });
        assert!(html.contains("OCR Complete!"));
        assert!(html.contains("download=\"ocr_processed_document.pdf\""));
        assert!(html.contains("href=\"data:application/pdf;base64,JVBERg==\""));
    }

    #[test]
    fn failure_message_is_escaped() {
        let html = render(&PageState::Failed {
            message: "bad <input> & \"quotes\"".into(),
        });
        assert!(html.contains("An error occurred: bad &lt;input&gt; &amp; &quot;quotes&quot;"));
        assert!(!html.contains("download="));
    }
}
