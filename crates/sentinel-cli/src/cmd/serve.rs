use anyhow::Result;
use sentinel_core::SentinelConfig;

pub fn run(config: SentinelConfig, host: &str, port: u16) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
        let actual_port = listener.local_addr()?.port();
        println!("API Sentinel → http://{host}:{actual_port}");

        tokio::select! {
            res = sentinel_server::serve_on(config, listener) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
