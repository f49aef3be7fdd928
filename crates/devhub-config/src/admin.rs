use crate::{env_lookup, non_blank};

const DEFAULT_ADMIN_ROLE: &str = "admin";

/// Decides which verified identities may use admin routes.
///
/// An identity is an admin when its `role` claim equals [`AdminPolicy::role`]
/// or its email is on the allow-list (compared case-insensitively).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminPolicy {
    pub role: String,
    pub emails: Vec<String>,
}

impl Default for AdminPolicy {
    fn default() -> Self {
        Self {
            role: DEFAULT_ADMIN_ROLE.to_string(),
            emails: Vec::new(),
        }
    }
}

impl AdminPolicy {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let emails = non_blank(&lookup, "ADMIN_EMAILS")
            .map(|list| {
                list.split(',')
                    .map(|email| email.trim().to_lowercase())
                    .filter(|email| !email.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            role: non_blank(&lookup, "ADMIN_ROLE").unwrap_or_else(|| DEFAULT_ADMIN_ROLE.to_string()),
            emails,
        }
    }

    pub fn with_emails<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.emails = emails
            .into_iter()
            .map(|email| email.as_ref().trim().to_lowercase())
            .collect();
        self
    }

    pub fn allows(&self, email: &str, role: Option<&str>) -> bool {
        if role.is_some_and(|role| role == self.role) {
            return true;
        }

        let email = email.trim().to_lowercase();
        self.emails.iter().any(|allowed| *allowed == email)
    }
}
