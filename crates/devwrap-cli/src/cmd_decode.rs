use devwrap_core::format::thousands;
use devwrap_core::{classify, derive_slides, StatsPayload, Tier};
use serde::Serialize;

#[derive(Serialize)]
struct DecodedLink<'a> {
    github: &'a str,
    tier: Tier,
    stats: &'a StatsPayload,
}

/// `devwrap decode <link> [--json]`
///
/// A link that doesn't decode is reported, not treated as a failure.
pub fn execute(link: &str, json: bool) -> anyhow::Result<()> {
    let (github, payload) = match devwrap_core::share::decode(link) {
        Ok(decoded) => decoded,
        Err(e) => {
            if json {
                println!("null");
            } else {
                println!("No reconstructable state in link ({e}).");
            }
            return Ok(());
        }
    };
    let tier = classify(payload.total_contributions, payload.total_commits_with_bug);

    if json {
        let out = DecodedLink {
            github: &github,
            tier,
            stats: &payload,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print!("{}", render_text(&github, tier, &payload));
    Ok(())
}

fn render_text(github: &str, tier: Tier, payload: &StatsPayload) -> String {
    let mut out = format!("{github}: {tier}\n");
    for slide in derive_slides(payload) {
        out.push_str(&format!("  {:<30} {}\n", slide.title, slide.value));
    }
    let cats = payload
        .project_categories
        .entries()
        .iter()
        .map(|(label, n)| format!("{label} {}", thousands(*n)))
        .collect::<Vec<_>>()
        .join(", ");
    out.push_str(&format!("  {:<30} {cats}\n", "Projects"));
    out
}
