use anyhow::Result;
use idilia::api::{default_client, Config, MultipartRequest, Payload};

/// Each text travels in its own part; the signature covers all of them.
const TEXTS: [&str; 3] = [
    "JFK was shot in Dallas.",
    "Nelson Mandela spent several years in prison.",
    "Marilyn Monroe wore Chanel No. 5 at night.",
];

fn main() -> Result<()> {
    env_logger::init();

    let client = default_client(Config::default())?;

    let mut req = MultipartRequest::new("/1/text/disambiguate.mpxml")
        .param("requestId", "mytest")
        .param("resultMime", "application/x-semdoc+xml+gz");
    for text in TEXTS {
        req = req.text(text);
    }

    let payload = client.call(req)?;
    println!(
        "Got response for request: {}",
        payload.request_id().unwrap_or_default()
    );

    for (text, part) in TEXTS.iter().zip(payload.parts()) {
        println!("For text: {text}");
        println!("Found senses:");

        let semdoc = Payload::parse(part.content_type(), &part.gunzip()?)?;
        if let Some(root) = semdoc.as_xml() {
            for fs in root.descendants("fs") {
                println!("  {}", fs.attr("sk").unwrap_or_default());
            }
        }
    }

    Ok(())
}
