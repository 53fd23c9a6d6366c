use anyhow::Result;
use idilia::api::{default_client, Config, FormRequest};
use serde_json::json;

fn main() -> Result<()> {
    env_logger::init();

    let queries = json!([
        { "lemma": "Montreal", "fsk": [{ "fsk": null, "definition": null, "extRefs": [], "neInfo": null }] },
        { "lemma": "kiss", "caseVariants": [{ "lemma": null, "fsk": [] }] },
        { "lemma": "chair", "fs": [{ "fs": null, "lemma": [], "definition": null,
            "parents": [{ "fs": null, "lemma": [], "definition": null }], "categories": [] }] }
    ]);

    let client = default_client(Config::default())?;

    // The compact JSON text is both sent and signed.
    let req = FormRequest::new("/1/kb/query.json")
        .param("requestId", "mytest")
        .signed_param("query", serde_json::to_string(&queries)?);

    let payload = client.call(req)?;
    if let Some(resp) = payload.as_json() {
        println!("{}", serde_json::to_string_pretty(resp)?);
    }

    Ok(())
}
