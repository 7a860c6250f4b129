use ravelry_harvest::run;

fn main() -> anyhow::Result<()> {
    // Requests are strictly sequential.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run())
}
