fn main() -> anyhow::Result<()> {
    planner_cli::run()
}
