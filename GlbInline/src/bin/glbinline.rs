fn main() -> anyhow::Result<()> {
    glbinline::cli::run_cli()
}
