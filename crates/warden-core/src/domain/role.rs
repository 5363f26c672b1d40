use serde::{Deserialize, Serialize};

use super::{FromDraft, Resource};

/// Role entity - a named permission group that users are assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i32,
    pub title: String,
    pub desc: String,
}

/// Fields for creating or fully replacing a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDraft {
    pub title: String,
    pub desc: String,
}

/// Fields for a partial role update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePatch {
    pub title: Option<String>,
    pub desc: Option<String>,
}

/// List filter for roles.
#[derive(Debug, Clone, Default)]
pub struct RoleFilter {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
}

impl Resource for Role {
    type Id = i32;
    type Draft = RoleDraft;
    type Patch = RolePatch;
    type Filter = RoleFilter;

    const NAME: &'static str = "role";

    fn id(&self) -> i32 {
        self.id
    }

    fn replace(&mut self, draft: RoleDraft) {
        self.title = draft.title;
        self.desc = draft.desc;
    }

    fn merge(&mut self, patch: RolePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(desc) = patch.desc {
            self.desc = desc;
        }
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.id != other.id && self.title == other.title
    }

    fn matches(&self, filter: &RoleFilter) -> bool {
        filter.title.as_deref().is_none_or(|needle| {
            self.title
                .to_lowercase()
                .contains(&needle.to_lowercase())
        })
    }
}

impl FromDraft for Role {
    fn from_draft(id: i32, draft: RoleDraft) -> Self {
        Self {
            id,
            title: draft.title,
            desc: draft.desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Role {
        Role::from_draft(
            1,
            RoleDraft {
                title: "admin".to_string(),
                desc: "full access".to_string(),
            },
        )
    }

    #[test]
    fn test_merge_only_touches_provided_fields() {
        let mut role = admin();
        role.merge(RolePatch {
            title: None,
            desc: Some("read only".to_string()),
        });

        assert_eq!(role.title, "admin");
        assert_eq!(role.desc, "read only");
    }

    #[test]
    fn test_title_filter_is_case_insensitive() {
        let role = admin();
        let filter = RoleFilter {
            title: Some("ADM".to_string()),
        };

        assert!(role.matches(&filter));
        assert!(role.matches(&RoleFilter::default()));
        assert!(!role.matches(&RoleFilter {
            title: Some("guest".to_string()),
        }));
    }

    #[test]
    fn test_conflict_ignores_self() {
        let role = admin();
        let mut other = admin();
        assert!(!role.conflicts_with(&other));

        other.id = 2;
        assert!(role.conflicts_with(&other));
    }
}
