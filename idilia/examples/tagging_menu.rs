use anyhow::{anyhow, Result};
use idilia::api::{default_client, Config, FormRequest, MultipartRequest};

fn main() -> Result<()> {
    env_logger::init();

    let client = default_client(Config::default())?;

    // Search expression with one paragraph per word.
    let text = "<p>tide</p> <p>cheer</p> <p>gain</p>";

    // Ask for the sense analysis as a separate, compressed result part.
    let analysis = client.call(
        FormRequest::new("/1/text/disambiguate.mpjson")
            .signed_param("text", text)
            .param("textMime", "text/query-html;charset=utf8")
            .param("resultMime", "application/x-tf+xml+gz"),
    )?;
    let result = analysis
        .parts()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("sense analysis returned no result part"))?;

    // Forward the result part untouched. Its payload is what gets signed.
    let menu = client.call(
        MultipartRequest::new("/1/kb/tagging_menu.json")
            .param("filters", "noDynamic")
            .part(result),
    )?;

    let resp = menu
        .as_json()
        .ok_or_else(|| anyhow!("expected a json response"))?;
    println!("Got words HTML as resp.text: {}", resp["text"]);
    println!("Got menu HTML as resp.menu: {}", resp["menu"]);

    Ok(())
}
