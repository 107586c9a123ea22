fn main() -> anyhow::Result<()> {
    shortcut_launcher::run()?;
    Ok(())
}
