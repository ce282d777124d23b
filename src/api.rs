//! Icon-font stylesheet client

use crate::error::IconFontError;
use crate::state::IconFontSheet;

/// Download the stylesheet that provides the snowflake glyph
pub async fn fetch_icon_font(href: &str) -> Result<IconFontSheet, IconFontError> {
    let response = reqwest::get(href).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(IconFontError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    Ok(IconFontSheet {
        href: href.to_string(),
        bytes: body.len(),
    })
}
