//! Share action boundary
//!
//! Builds the external compose link for casting a final score. The host
//! navigates to the returned URL; nothing comes back.

/// Compose surface the share deeplink targets
pub const COMPOSE_BASE: &str = "https://warpcast.com/~/compose";

/// Placeholder for the game's own shareable link
// TODO: point at the deployed frame URL once the host settles on one
pub const SHARE_LINK_PLACEHOLDER: &str = "TODO";

const FRUIT_ROW: &str =
    "\u{1F34E}\u{1F34A}\u{1F34B}\u{1F349}\u{1F347}\u{1F353}\u{1F351}\u{1F34D}";

/// Build the compose URL for a final score.
///
/// The text body is pre-encoded (newlines as %0A, spaces as %20) so the
/// whole thing stays a plain string concatenation.
pub fn compose_url(score: u32) -> String {
    format!(
        "{base}?text={row}%0A%0AMy%20score%20on%20Fruit%20Slash%20is%20{score}%0A%0ATry%20to%20beat%20my%20score%20here%3A%20{link}%20%0A%0A{row}",
        base = COMPOSE_BASE,
        row = FRUIT_ROW,
        score = score,
        link = SHARE_LINK_PLACEHOLDER,
    )
}
