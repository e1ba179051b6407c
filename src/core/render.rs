use crate::domain::model::NormalizedPhoto;
use crate::domain::settings::ReadmeTemplate;
use crate::utils::error::{Result, UpdateError};
use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Renders the README body for one photo. Output depends only on its inputs.
pub fn render(photo: &NormalizedPhoto, template: &ReadmeTemplate) -> String {
    let mut doc = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(doc, "# {}", template.heading);
    doc.push('\n');
    let _ = writeln!(doc, "## {}", template.tagline);
    doc.push('\n');
    let _ = writeln!(doc, "![{}]({})", template.badge_alt, template.badge_url);
    doc.push('\n');
    let _ = writeln!(
        doc,
        "[![{}]({})]({})",
        photo.title, photo.image_url, photo.link
    );
    doc.push('\n');
    let _ = writeln!(doc, "**[{}]({})**", photo.title, photo.link);

    if !photo.description.is_empty() {
        doc.push('\n');
        doc.push_str(&blockquote(&photo.description));
    }

    doc.push_str("\n\n---\n");

    if let Some(footer) = template.footer.as_deref().filter(|f| !f.trim().is_empty()) {
        doc.push('\n');
        doc.push_str(footer.trim_end());
        doc.push('\n');
    }

    doc
}

fn blockquote(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                ">\n".to_string()
            } else {
                format!("> {}\n", line.trim_end())
            }
        })
        .collect()
}

/// Confirms `path` is an existing regular file that can be overwritten.
/// Only metadata is inspected; the current contents are never read.
pub fn check_document(path: &Path) -> Result<()> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(UpdateError::FileAccess {
                path: path.display().to_string(),
                reason: "file not found".to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    if !meta.is_file() {
        return Err(UpdateError::FileAccess {
            path: path.display().to_string(),
            reason: "not a regular file".to_string(),
        });
    }
    if meta.permissions().readonly() {
        return Err(UpdateError::FileAccess {
            path: path.display().to_string(),
            reason: "file is read-only".to_string(),
        });
    }
    Ok(())
}

/// Replaces the whole contents of `path`; never appends.
pub fn overwrite_document(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data)?;
    tracing::debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

/// Overwrites `path` with `text`. Returns `false` (and logs) when the target
/// is missing or cannot be written.
pub fn write_document(path: &Path, text: &str) -> bool {
    let result = check_document(path).and_then(|()| overwrite_document(path, text.as_bytes()));
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("README not updated: {}", e);
            false
        }
    }
}
