//! Inline button tags.

/// The closed set of callback tags the engine attaches to menu buttons and
/// recognizes on button-press events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonTag {
    /// Start an upload.
    Upload,
    /// Open the feed.
    View,
    /// Open the user's own profile.
    Profile,
    /// Approve the current item.
    ReactApprove,
    /// Disapprove the current item.
    ReactDisapprove,
    /// Start commenting on the current item.
    CommentBegin,
    /// Next page of the profile view.
    ProfileNext,
    /// Previous page of the profile view.
    ProfilePrev,
    /// Community-wide stats card.
    Stats,
    /// Back to the main menu.
    Menu,
}

impl ButtonTag {
    /// Wire form of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::View => "view",
            Self::Profile => "profile",
            Self::ReactApprove => "react:approve",
            Self::ReactDisapprove => "react:disapprove",
            Self::CommentBegin => "comment:begin",
            Self::ProfileNext => "profile:next",
            Self::ProfilePrev => "profile:prev",
            Self::Stats => "stats",
            Self::Menu => "menu",
        }
    }

    /// Parse a wire tag. Returns `None` for tags this engine never issued.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "upload" => Some(Self::Upload),
            "view" => Some(Self::View),
            "profile" => Some(Self::Profile),
            "react:approve" => Some(Self::ReactApprove),
            "react:disapprove" => Some(Self::ReactDisapprove),
            "comment:begin" => Some(Self::CommentBegin),
            "profile:next" => Some(Self::ProfileNext),
            "profile:prev" => Some(Self::ProfilePrev),
            "stats" => Some(Self::Stats),
            "menu" => Some(Self::Menu),
            _ => None,
        }
    }
}
