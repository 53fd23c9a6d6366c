use anyhow::Result;
use bytes::Bytes;
use idilia_core::Context;
use idilia_http_send_reqwest::ReqwestHttpSend;
use reqwest::blocking::Client;
use std::time::Duration;

fn main() -> Result<()> {
    let _ = env_logger::try_init();

    // Keep a single idle connection so consecutive requests reuse it.
    let client = Client::builder()
        .http1_only()
        .pool_max_idle_per_host(1)
        .timeout(Duration::from_secs(30))
        .user_agent("idilia-example/0.1")
        .build()?;

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));

    let url = "http://api.idilia.com/";
    println!("Sending GET {url} twice over the same connection");

    for round in 1..=2 {
        let req = http::Request::get(url)
            .header("accept-encoding", "gzip")
            .body(Bytes::new())?;

        match ctx.http_send(req) {
            Ok(resp) => {
                println!("round {round}: status {}", resp.status());
                for (name, value) in resp.headers() {
                    println!("  {name}: {value:?}");
                }
            }
            Err(e) => println!("round {round}: request failed: {e}"),
        }
    }

    Ok(())
}
