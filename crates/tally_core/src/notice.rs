use crate::AccessToken;

/// Operator-facing authentication notice for the boundary layer to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthNotice {
    /// No account has been connected yet.
    ConnectPrompt,
    /// The token has expired. The dismiss key embeds year and month so an
    /// acknowledged notice reappears the following month.
    ReauthPrompt { dismiss_key: String },
}

impl AuthNotice {
    /// The message text to render.
    pub fn message(&self) -> &'static str {
        match self {
            Self::ConnectPrompt => {
                "Connect a Facebook account to fetch share counts from the Graph API."
            }
            Self::ReauthPrompt { .. } => {
                "The Facebook access token has expired. Please re-authenticate to keep share counts updating."
            }
        }
    }
}

/// Notice policy for the given token state. Pure; the caller supplies the
/// current year and month.
pub fn auth_notice(token: &AccessToken, year: i32, month: u32) -> Option<AuthNotice> {
    match token {
        AccessToken::Absent => Some(AuthNotice::ConnectPrompt),
        AccessToken::Expired => Some(AuthNotice::ReauthPrompt {
            dismiss_key: format!("facebook_reauth_{year}_{month:02}"),
        }),
        AccessToken::Valid(_) => None,
    }
}
