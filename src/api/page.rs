//! Server-rendered profile page.

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::debug;

use super::AppState;
use crate::error::Result;
use crate::types::Profile;

const TEMPLATE: &str = include_str!("../../templates/profile.html");
const NO_PROFILES: &str = "No profiles found";

/// `GET /?profileid=<id>`: the requested profile, or the first one stored.
pub async fn show(State(state): State<AppState>, RawQuery(query): RawQuery) -> Result<Response> {
    let profiles = &state.services.profiles;
    let requested = query.as_deref().and_then(profile_id_param);
    let profile = match requested.as_deref() {
        Some(raw) => match profiles.get(raw).await {
            Ok(profile) => Some(profile),
            Err(e) if e.is_client_error() => {
                debug!(raw, error = %e, "Page profile lookup failed");
                None
            }
            Err(e) => return Err(e),
        },
        None => profiles.first().await?,
    };

    Ok(match profile {
        Some(profile) => Html(render(&profile)).into_response(),
        None => (StatusCode::NOT_FOUND, NO_PROFILES).into_response(),
    })
}

/// The first `profileid` in the query string, with an empty value treated
/// as absent. Repeated keys never reject the request.
fn profile_id_param(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "profileid")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}

/// Fill `{{field}}` tokens in one pass over the template. Inserted values are
/// never scanned again, so field text cannot expand into other fields.
fn render(profile: &Profile) -> String {
    let tritype = profile.tritype.map(|t| t.to_string()).unwrap_or_default();
    let mut html = String::with_capacity(TEMPLATE.len() + 512);
    let mut rest = TEMPLATE;

    while let Some(start) = rest.find("{{") {
        html.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let token = after
            .find("}}")
            .and_then(|end| field(profile, &tritype, &after[..end]).map(|value| (end, value)));
        match token {
            Some((end, value)) => {
                html.push_str(&escape(value));
                rest = &after[end + 2..];
            }
            None => {
                html.push_str("{{");
                rest = after;
            }
        }
    }
    html.push_str(rest);
    html
}

fn field<'a>(profile: &'a Profile, tritype: &'a str, key: &str) -> Option<&'a str> {
    Some(match key {
        "name" => profile.name.as_str(),
        "description" => profile.description.as_str(),
        "mbti" => profile.mbti.as_str(),
        "enneagram" => profile.enneagram.as_str(),
        "variant" => profile.variant.as_str(),
        "tritype" => tritype,
        "socionics" => profile.socionics.as_str(),
        "sloan" => profile.sloan.as_str(),
        "psyche" => profile.psyche.as_str(),
        "image" => profile.image.as_str(),
        _ => return None,
    })
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
