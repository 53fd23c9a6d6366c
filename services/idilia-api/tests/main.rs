use std::env;
use std::sync::Arc;

use idilia_api::{Client, Config, DefaultCredentialProvider, FormRequest, RequestSigner};
use idilia_core::{Context, OsEnv, Result, Signer};
use idilia_http_send_reqwest::ReqwestHttpSend;
use log::{debug, warn};

mod transport;

fn init_client() -> Option<Client> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("IDILIA_API_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let ctx = Context::new().with_env(OsEnv);
    let config = Config::default().from_env(&ctx);
    let ctx = ctx.with_http_send(
        ReqwestHttpSend::persistent(config.timeout).expect("http client must build"),
    );

    let loader = DefaultCredentialProvider::new(Arc::new(config.clone()));
    let signer = Signer::new(ctx, loader, RequestSigner::new());
    Some(Client::new(signer, &config.endpoint).expect("IDILIA_ACCESS_KEY and IDILIA_PRIVATE_KEY must be set"))
}

#[test]
fn test_live_kb_query() -> Result<()> {
    let Some(client) = init_client() else {
        warn!("IDILIA_API_TEST is not set, skipped");
        return Ok(());
    };

    let req = FormRequest::new("/1/kb/query.json")
        .param("requestId", "mytest")
        .signed_param("query", r#"[{"lemma":"kiss","caseVariants":[{"lemma":null,"fsk":[]}]}]"#);

    let payload = client.call(req)?;
    debug!("got response: {payload:?}");
    assert_eq!(payload.request_id().as_deref(), Some("mytest"));

    Ok(())
}
