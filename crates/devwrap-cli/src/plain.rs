//! Line-oriented runner for `devwrap show --plain` and builds without the TUI.
//!
//! Time is virtual here: the runner sleeps until the controller's next
//! deadline and then ticks at exactly that instant.

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use devwrap_core::format::thousands;
use devwrap_core::Tier;
use devwrap_fetch::StatsFetcher;
use devwrap_session::{NoticeLevel, Phase, PresentationController, CLOSING_MESSAGE};

use crate::cmd_show::Prefill;

pub fn run(
    controller: PresentationController,
    fetcher: &dyn StatsFetcher,
    prefill: Prefill,
) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();
    present(
        controller,
        fetcher,
        prefill,
        &mut input,
        &mut out,
        std::thread::sleep,
    )
}

fn present(
    mut controller: PresentationController,
    fetcher: &dyn StatsFetcher,
    mut prefill: Prefill,
    input: &mut impl BufRead,
    out: &mut impl Write,
    mut sleep: impl FnMut(Duration),
) -> anyhow::Result<()> {
    let mut now = Instant::now();

    while controller.phase() == Phase::Input {
        let (github, stackoverflow) = match prefill.take() {
            Some(pair) => pair,
            None => match prompt(input, out)? {
                Some(pair) => pair,
                None => {
                    controller.teardown();
                    return Ok(());
                }
            },
        };
        match controller.submit(&github, &stackoverflow) {
            Ok(ids) => {
                writeln!(out, "Fetching stats for {}...", ids.github)?;
                let result = fetcher.fetch(&ids);
                now = now.max(Instant::now());
                controller.resolve(result, now);
            }
            Err(e) => writeln!(out, "{e}")?,
        }
    }

    if let Some(notice) = controller.notice() {
        let marker = match notice.level {
            NoticeLevel::Info => "*",
            NoticeLevel::Error => "!",
        };
        writeln!(out, "{marker} {}", notice.message)?;
    }

    let mut shown = None;
    loop {
        match controller.phase() {
            Phase::Presenting(i) => {
                if shown != Some(i) {
                    write_slide(&controller, out)?;
                    shown = Some(i);
                }
                let Some(deadline) = controller.next_deadline() else {
                    break;
                };
                sleep(deadline.saturating_duration_since(now));
                now = now.max(deadline);
                controller.tick(now);
            }
            Phase::Summary => {
                write_summary(&controller, out)?;
                break;
            }
            Phase::Input => break,
        }
    }

    controller.teardown();
    Ok(())
}

/// Ask for both profile URLs. `None` on end of input.
fn prompt(input: &mut impl BufRead, out: &mut impl Write) -> anyhow::Result<Prefill> {
    let Some(github) = ask(input, out, "GitHub profile URL: ")? else {
        return Ok(None);
    };
    let stackoverflow = ask(input, out, "Stack Overflow profile URL (optional): ")?.unwrap_or_default();
    Ok(Some((github, stackoverflow)))
}

fn ask(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> anyhow::Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn write_slide(controller: &PresentationController, out: &mut impl Write) -> anyhow::Result<()> {
    let (Some(slide), Some((shown, total))) = (controller.current_slide(), controller.progress())
    else {
        return Ok(());
    };
    writeln!(out)?;
    writeln!(out, "[{}/{total}] {}", shown + 1, slide.title)?;
    writeln!(out, "    {}", slide.value)?;
    writeln!(out, "    {}", slide.description)?;
    Ok(())
}

fn write_summary(controller: &PresentationController, out: &mut impl Write) -> anyhow::Result<()> {
    let Some(summary) = controller.summary() else {
        return Ok(());
    };
    writeln!(out)?;
    writeln!(out, "Your {} Dev Wrapped", controller.options().year)?;
    if let Some(payload) = controller.state().payload() {
        let username = controller.state().username();
        writeln!(out, "{}", profile_line(username, payload.total_contributions, summary.tier))?;
    }
    writeln!(out, "Tier: {}", summary.tier)?;
    for slide in controller.slides() {
        writeln!(out, "  {:<30} {}", slide.title, slide.value)?;
    }
    if let Some(payload) = controller.state().payload() {
        let projects = payload
            .project_categories
            .entries()
            .iter()
            .map(|(label, n)| format!("{label} {}", thousands(*n)))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "  {:<30} {projects}", "Projects")?;
    }
    writeln!(out)?;
    writeln!(out, "{CLOSING_MESSAGE}")?;
    writeln!(out, "Share: {}", summary.share.url)?;
    Ok(())
}

/// `@user · N contributions · tier`
pub(crate) fn profile_line(username: &str, contributions: u64, tier: Tier) -> String {
    format!("@{username} · {} contributions · {tier}", thousands(contributions))
}
