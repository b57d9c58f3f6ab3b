#![cfg(feature = "http")]

use chrono::{DateTime, TimeZone, Utc};
use s3_signed_auth::{SignError, SignOptions, Signer, ValidationError};

fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2014, 10, 1, 0, 42, 0).unwrap()
}

fn header<'a, B>(request: &'a http::Request<B>, name: &str) -> &'a str {
    request.headers().get(name).unwrap().to_str().unwrap()
}

#[test]
fn authorizes_get() {
    let signer = Signer::new("ok", "pouet", Some("panier")).unwrap();
    let mut request = http::Request::get("https://panier.s3.amazonaws.com/photo.png")
        .body(())
        .unwrap();
    signer.authorize(&mut request, SignOptions::new().timestamp(timestamp())).unwrap();
    assert_eq!(header(&request, "authorization"), "AWS ok:v11wbdzl77Qg5Kzh1R57PHCrpgw=");
    assert_eq!(header(&request, "x-amz-date"), "Wed, 01 Oct 2014 00:42:00 GMT");
}

#[test]
fn uses_content_type_header() {
    let signer = Signer::new("ok", "pouet", None).unwrap();
    let mut request = http::Request::put("/photo.png")
        .header("content-type", "image/png")
        .body(Vec::<u8>::new())
        .unwrap();
    signer
        .authorize(&mut request, SignOptions::new().bucket_name("panier").timestamp(timestamp()))
        .unwrap();
    assert_eq!(header(&request, "authorization"), "AWS ok:0yjbdwyGjoPDeBTAXzbYhycWhYo=");
}

#[test]
fn decodes_uri_path_before_signing() {
    let signer = Signer::new("ok", "pouet", Some("panier")).unwrap();
    let mut request = http::Request::delete("/p%20h%20o%20t%20o%20.p%20n%20g")
        .body(())
        .unwrap();
    signer.authorize(&mut request, SignOptions::new().timestamp(timestamp())).unwrap();
    assert_eq!(header(&request, "authorization"), "AWS ok:nxMKCOSNDryMtTboO+pMVuor8vo=");
}

#[test]
fn rejects_unsupported_method() {
    let signer = Signer::new("ok", "pouet", Some("panier")).unwrap();
    let mut request = http::Request::post("/photo.png").body(()).unwrap();
    assert_eq!(
        signer.authorize(&mut request, SignOptions::new()).unwrap_err(),
        SignError::Validation(ValidationError::UnsupportedMethod("POST".to_string()))
    );
    assert!(request.headers().get("authorization").is_none());
}
