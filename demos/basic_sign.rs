extern crate s3_signed_auth;

use chrono::Utc;
use s3_signed_auth::*;

fn main() {
    let config = SignerConfig::new("my_access_key", "my_secret_key").with_default_bucket("my-bucket");
    let signer = config.build().expect("Failed to build signer");
    let now = Utc::now();

    let authorization = signer
        .sign_put(
            "/photos/cat.png",
            SignOptions::new()
                .timestamp(now)
                .mime_type("image/png")
                .output(OutputMode::HttpHeader),
        )
        .expect("Failed to sign");
    println!("{}: {}", AMZ_DATE_HEADER, format_timestamp(&now));
    println!("authorization: {}", authorization);

    let token = signer
        .sign_get("/photos/cat.png", SignOptions::new().timestamp(now).output(OutputMode::QueryString))
        .expect("Failed to sign");
    println!("query signature: {}", token);
}
