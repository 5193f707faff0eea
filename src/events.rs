/// Host change notifications, funnelled into one stream of tags.
///
/// No payload is kept: every reaction is "something changed, re-read".
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    BookmarkCreated,
    BookmarkChanged,
    BookmarkMoved,
    BookmarkRemoved,
    TabUpdated,
    TabActivated,
    WindowFocusChanged,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 7] = [
        ChangeKind::BookmarkCreated,
        ChangeKind::BookmarkChanged,
        ChangeKind::BookmarkMoved,
        ChangeKind::BookmarkRemoved,
        ChangeKind::TabUpdated,
        ChangeKind::TabActivated,
        ChangeKind::WindowFocusChanged,
    ];

    /// Tag used by the JS bridge
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::BookmarkCreated => "bookmarks.onCreated",
            ChangeKind::BookmarkChanged => "bookmarks.onChanged",
            ChangeKind::BookmarkMoved => "bookmarks.onMoved",
            ChangeKind::BookmarkRemoved => "bookmarks.onRemoved",
            ChangeKind::TabUpdated => "tabs.onUpdated",
            ChangeKind::TabActivated => "tabs.onActivated",
            ChangeKind::WindowFocusChanged => "windows.onFocusChanged",
        }
    }

    /// Whether list contents may have changed (as opposed to only the active tab)
    pub fn is_bookmark_change(&self) -> bool {
        matches!(
            self,
            ChangeKind::BookmarkCreated
                | ChangeKind::BookmarkChanged
                | ChangeKind::BookmarkMoved
                | ChangeKind::BookmarkRemoved
        )
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChangeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown change event: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bridge_tags() {
        assert_eq!("bookmarks.onMoved".parse::<ChangeKind>(), Ok(ChangeKind::BookmarkMoved));
        assert_eq!("tabs.onActivated".parse::<ChangeKind>(), Ok(ChangeKind::TabActivated));
        assert!("bookmarks.onImportEnded".parse::<ChangeKind>().is_err());
    }

    #[test]
    fn test_tags_are_distinct() {
        for kind in ChangeKind::ALL {
            assert_eq!(kind.to_string().parse::<ChangeKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_bookmark_changes() {
        let bookmark_kinds: Vec<ChangeKind> = ChangeKind::ALL
            .into_iter()
            .filter(ChangeKind::is_bookmark_change)
            .collect();

        assert_eq!(bookmark_kinds.len(), 4);
        assert!(!ChangeKind::WindowFocusChanged.is_bookmark_change());
    }
}
