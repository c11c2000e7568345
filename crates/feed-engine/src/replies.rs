//! Reply texts and menu builders.

use bot_core::{Menu, MenuButton};
use database::{Item, OwnerStats};

use crate::buttons::ButtonTag;

/// Capability overview shown for the help command.
pub const HELP_TEXT: &str = "Palette is a small art community.

What you can do here:
• Upload - share one of your pieces (with an optional caption)
• Browse - see work from other members, one piece at a time
• Like / Dislike - each piece can be rated once; no take-backs
• Comment - leave a note for the artist on the piece you're viewing
• Profile - flip through your own uploads and their ratings

Use /start to get back to the main menu at any time.";

/// Notice sent when a store operation fails mid-event.
pub const RETRY_TEXT: &str = "Something went wrong on our side. Please try that again.";

fn button(label: &str, tag: ButtonTag) -> MenuButton {
    MenuButton::new(label, tag.as_str())
}

/// The main menu.
pub fn main_menu() -> Menu {
    Menu::new()
        .row(vec![button("Upload art", ButtonTag::Upload)])
        .row(vec![button("Browse art", ButtonTag::View)])
        .row(vec![button("My profile", ButtonTag::Profile)])
        .row(vec![button("Community stats", ButtonTag::Stats)])
}

/// A lone back-to-menu row.
pub fn back_menu() -> Menu {
    Menu::new().row(vec![button("Back", ButtonTag::Menu)])
}

/// Action menu attached to a feed card.
pub fn feed_menu() -> Menu {
    Menu::new()
        .row(vec![
            button("Like", ButtonTag::ReactApprove),
            button("Dislike", ButtonTag::ReactDisapprove),
        ])
        .row(vec![button("Comment", ButtonTag::CommentBegin)])
        .row(vec![button("Back", ButtonTag::Menu)])
}

/// Navigation menu attached to a profile card.
///
/// The prev/next row only appears when there is something to flip through.
pub fn profile_menu(total: usize) -> Menu {
    let mut menu = Menu::new();
    if total > 1 {
        menu = menu.row(vec![
            button("Prev", ButtonTag::ProfilePrev),
            button("Next", ButtonTag::ProfileNext),
        ]);
    }
    menu.row(vec![button("Browse art", ButtonTag::View)])
        .row(vec![button("Upload art", ButtonTag::Upload)])
        .row(vec![button("Back", ButtonTag::Menu)])
}

/// Menu offered once an upload has been stored.
pub fn after_upload_menu() -> Menu {
    Menu::new()
        .row(vec![button("Browse art", ButtonTag::View)])
        .row(vec![button("My profile", ButtonTag::Profile)])
        .row(vec![button("Back", ButtonTag::Menu)])
}

/// Greeting for the main menu.
pub fn welcome_text(username: Option<&str>) -> String {
    format!(
        "Hi, {}! Welcome to the art community.\n\n\
         Share your own work and rate what others have made.",
        username.unwrap_or("anonymous")
    )
}

/// Prompt shown when the user starts an upload.
pub const UPLOAD_PROMPT: &str =
    "Send me your image (add a caption if you like).\n\nIt goes live as soon as it's saved.";

/// Rejection for non-media input while an upload is expected.
pub const UPLOAD_REJECTION: &str = "Please send an image.";

/// Confirmation after an upload was stored.
pub fn upload_confirmation(item_id: i64) -> String {
    format!(
        "Your art is in (#{})! Other members can rate it now.",
        item_id
    )
}

/// Prompt shown when the user starts a comment.
pub const COMMENT_PROMPT: &str = "Write your comment for this piece:";

/// Rejection for media input while a comment is expected.
pub const COMMENT_REJECTION: &str = "Just text, please - send your comment as a message.";

/// Confirmation after a comment was stored.
pub const COMMENT_CONFIRMATION: &str = "Comment added!";

/// Shown when the feed has no more unseen items.
pub const FEED_EXHAUSTED: &str =
    "You've rated everything available! Check back later, or upload something of your own.";

/// Shown on a duplicate reaction.
pub const ALREADY_REACTED: &str = "You already rated this one.";

/// Shown when the referenced item no longer exists.
pub const ITEM_GONE: &str = "That piece is no longer available.";

/// Shown when a reaction or comment arrives with nothing on screen.
pub const NO_CURRENT_ITEM: &str = "Nothing is open right now - browse the feed first.";

/// Confirmation for a recorded reaction.
pub fn reaction_recorded(approve: bool) -> &'static str {
    if approve {
        "Like counted!"
    } else {
        "Dislike counted!"
    }
}

/// Caption for a feed card.
pub fn feed_caption(item: &Item) -> String {
    let counts = format!("Likes: {} | Dislikes: {}", item.likes, item.dislikes);
    match item.caption.as_deref() {
        Some(caption) if !caption.is_empty() => format!("{}\n\n{}", caption, counts),
        _ => counts,
    }
}

/// Caption for a profile card showing one owned item.
pub fn profile_caption(stats: &OwnerStats, item: &Item, index: usize, total: usize) -> String {
    let mut text = format!(
        "Your profile\n\
         Uploads: {}\n\
         Likes: {}\n\
         Dislikes: {}\n\n\
         Piece {}/{}\n\
         Likes: {} | Dislikes: {}",
        stats.items,
        stats.likes,
        stats.dislikes,
        index + 1,
        total,
        item.likes,
        item.dislikes
    );
    if let Some(caption) = item.caption.as_deref() {
        if !caption.is_empty() {
            text.push_str("\n\n");
            text.push_str(caption);
        }
    }
    text
}

/// Profile view for a user with no uploads.
pub const PROFILE_EMPTY: &str = "Your profile\n\
     Uploads: 0\n\
     Likes: 0\n\
     Dislikes: 0\n\n\
     Nothing here yet - upload your first piece!";

/// Community-wide stats card.
pub fn stats_text(users: i64, items: i64) -> String {
    format!(
        "Community stats\n\nMembers: {}\nUploads: {}",
        users, items
    )
}
