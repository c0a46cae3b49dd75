use devwrap_core::tier::classify_signed;

/// `devwrap tier <contributions> <bugs>`
pub fn execute(contributions: i64, bugs: i64) -> anyhow::Result<()> {
    let tier = classify_signed(contributions, bugs);
    println!("{tier}");
    Ok(())
}
