use anyhow::Result;
use idilia::api::{default_client, Config, FormRequest};

fn main() -> Result<()> {
    env_logger::init();

    let client = default_client(Config::default())?;

    for text in ["porch lights", "car engine problems diagnosing", "nikon digital camera"] {
        let req = FormRequest::new("/1/text/paraphrase.xml")
            .param("requestId", "mytest")
            .signed_param("text", text)
            .param("maxCount", "10")
            .param("minWeight", "0.5")
            .param("paraphrasingRecipe", "productSearch")
            .param("textMime", "text/query; charset=us-ascii");

        let payload = client.call(req)?;
        let Some(resp) = payload.as_xml() else {
            anyhow::bail!("expected an xml response");
        };

        let conf = resp
            .find("queryConf/confCorrectFineMostProbable")
            .map(|e| e.text())
            .unwrap_or_default();
        println!("Paraphrases received for query: [{text}] (overall conf: {conf})");

        for p in resp.descendants("paraphrase") {
            let surface = p.child("surface").map(|e| e.text()).unwrap_or_default();
            let weight = p.child("weight").map(|e| e.text()).unwrap_or_default();
            println!("  [{surface}] with weight {weight}");
        }
        println!();
    }

    Ok(())
}
