use anyhow::Result;
use idilia::api::{default_client, Config, FormRequest};

/// Tweets mentioning "tide", checked for the sense of an ocean tide.
const TEXTS: [&str; 2] = [
    "RT @blecklerr: just saw a southern tide decal on a nissan with dark tint and the biggest shiniest rims. #theyreconfused #WhatsGoingOnHere",
    "In honor of the Crimson Tide, here's the song of the day. Welcome to Miami, vien bonito amiami !! See you at... http://t.co/vdkan4mN",
];

fn main() -> Result<()> {
    env_logger::init();

    let client = default_client(Config::default())?;

    for text in TEXTS {
        let req = FormRequest::new("/1/text/match.json")
            .param("requestId", "mytest")
            .signed_param("text", text)
            .param("textMime", "text/tweet; charset=UTF-8")
            .param("filter", r#"{"fsk":"tide/N1"}"#);

        let payload = client.call(req)?;
        let resp = payload.as_json().cloned().unwrap_or_default();

        println!("{text}");
        match resp["matches"].as_array() {
            Some(matches) => {
                for m in matches {
                    match m["foundSk"].as_str() {
                        Some(sk) => println!(
                            "  Found identity or equivalent sensekey {sk} at offset {} with confidence {:.2} and for reason {}",
                            m["position"][0], m["conf"].as_f64().unwrap_or_default(), m["reasons"][0]
                        ),
                        None => println!("  Word match but wrong sense"),
                    }
                }
            }
            None => println!("  No word match"),
        }
        println!();
    }

    Ok(())
}
