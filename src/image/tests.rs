use super::*;
use crate::errors::{NameError, ReferenceError};
use std::collections::BTreeSet;

const DIGEST: &str = "sha256:deadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeef";
const OTHER_DIGEST: &str =
    "sha256:2fb7bfc6145d0ad40334f1802707c2e2390bdcfc16ca636d9ed8a56c1101f5b9";

fn synonym_strings(name: &ImageName) -> BTreeSet<String> {
    name.synonyms().iter().map(|s| s.to_string()).collect()
}

fn strings(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn ubuntu_forms(suffix: &str) -> BTreeSet<String> {
    ["", "library/", "docker.io/library/", "index.docker.io/library/"]
        .iter()
        .map(|prefix| format!("{}ubuntu{}", prefix, suffix))
        .collect()
}

#[test]
fn empty_string() {
    assert_eq!(
        ImageName::parse(""),
        Err(NameError::Parse(ReferenceError::InvalidReferenceFormat(
            "".to_owned()
        )))
    );
    assert_eq!(
        ImageName::parse("").unwrap_err().to_string(),
        "invalid reference format"
    );
    assert_eq!(
        ImageName::parse("a b").unwrap_err().to_string(),
        "invalid reference format: \"a b\""
    );
}

#[test]
fn plain_name() {
    let name = ImageName::parse("ubuntu").unwrap();
    assert_eq!(name.tag(), None);
    assert_eq!(name.digest(), Digest::EMPTY);
    assert_eq!(name.as_str(), "docker.io/library/ubuntu");
    assert_eq!(name.host().unwrap(), "docker.io");
    assert_eq!(name.path().unwrap(), "library/ubuntu");
    assert_eq!(name.name().unwrap(), "docker.io/library/ubuntu");
    assert_eq!(name.normalize(), name);
    assert_eq!(synonym_strings(&name), ubuntu_forms(""));
}

#[test]
fn tagged_name() {
    let name = ImageName::parse("ubuntu:18.10").unwrap();
    assert_eq!(name.tag(), Some("18.10"));
    assert_eq!(name.as_str(), "docker.io/library/ubuntu:18.10");
    assert_eq!(name.path().unwrap(), "library/ubuntu");
    assert_eq!(name.name().unwrap(), "docker.io/library/ubuntu");
    assert_eq!(name.normalize(), name);
    assert_eq!(synonym_strings(&name), ubuntu_forms(":18.10"));
}

#[test]
fn digested_name() {
    let name = ImageName::parse(&format!("ubuntu@{}", DIGEST)).unwrap();
    assert_eq!(name.tag(), None);
    assert_eq!(name.digest(), Digest::new(DIGEST));
    assert_eq!(name.digest().as_str(), DIGEST);
    assert_eq!(name.as_str(), format!("docker.io/library/ubuntu@{}", DIGEST));
    assert_eq!(name.path().unwrap(), "library/ubuntu");
    assert_eq!(name.normalize(), name);
    assert_eq!(synonym_strings(&name), ubuntu_forms(&format!("@{}", DIGEST)));
}

#[test]
fn tagged_and_digested_name() {
    let suffix = format!(":18.10@{}", DIGEST);
    let name = ImageName::parse(&format!("ubuntu{}", suffix)).unwrap();
    assert_eq!(name.tag(), Some("18.10"));
    assert_eq!(name.digest(), Digest::new(DIGEST));
    assert_eq!(name.as_str(), format!("docker.io/library/ubuntu{}", suffix));
    assert_eq!(name.path().unwrap(), "library/ubuntu");
    assert_eq!(name.name().unwrap(), "docker.io/library/ubuntu");
    assert_eq!(name.without_digest(), "docker.io/library/ubuntu");
    assert_eq!(name.normalize(), name);
    assert_eq!(synonym_strings(&name), ubuntu_forms(&suffix));
}

#[test]
fn every_spelling_normalizes_the_same() {
    for spelling in &[
        "ubuntu",
        "library/ubuntu",
        "docker.io/library/ubuntu",
        "index.docker.io/library/ubuntu",
        "docker.io/ubuntu",
    ] {
        let name = ImageName::parse(spelling).unwrap();
        assert_eq!(name.as_str(), "docker.io/library/ubuntu", "{}", spelling);
        assert_eq!(synonym_strings(&name), ubuntu_forms(""), "{}", spelling);
    }
}

#[test]
fn synonyms_of_synonyms() {
    let name = ImageName::parse("index.docker.io/library/ubuntu").unwrap();
    let synonyms = name.synonyms();
    for synonym in &synonyms {
        assert_eq!(synonym.normalize().synonyms(), synonyms, "{}", synonym);
    }
}

#[test]
fn synonym_without_host() {
    let written = format!("ubuntu:18.10@{}", DIGEST);
    let name = ImageName::parse(&written).unwrap();
    let synonym = name
        .synonyms()
        .into_iter()
        .find(|s| s.as_str() == written)
        .expect("host-less synonym");

    assert_eq!(synonym.tag(), Some("18.10"));
    assert_eq!(synonym.digest(), Digest::new(DIGEST));
    assert_eq!(synonym.host().unwrap(), "docker.io");
    assert_eq!(synonym.path().unwrap(), "library/ubuntu");
    assert_eq!(synonym.normalize(), name);
    assert_eq!(synonym_strings(&synonym), ubuntu_forms(&format!(":18.10@{}", DIGEST)));
}

#[test]
fn user_repository_synonyms() {
    let name = ImageName::parse("someone/tool:1.0").unwrap();
    assert_eq!(name.as_str(), "docker.io/someone/tool:1.0");
    assert_eq!(
        synonym_strings(&name),
        strings(&[
            "someone/tool:1.0",
            "docker.io/someone/tool:1.0",
            "index.docker.io/someone/tool:1.0",
        ])
    );
}

#[test]
fn nested_library_path_keeps_prefix() {
    let name = ImageName::parse("library/group/tool").unwrap();
    assert_eq!(
        synonym_strings(&name),
        strings(&[
            "library/group/tool",
            "docker.io/library/group/tool",
            "index.docker.io/library/group/tool",
        ])
    );
}

#[test]
fn ambiguous_synonym_is_dropped() {
    // With the host left out, "my.user" would be read as a registry
    let name = ImageName::parse("docker.io/my.user/tool").unwrap();
    assert_eq!(name.path().unwrap(), "my.user/tool");
    assert_eq!(
        synonym_strings(&name),
        strings(&[
            "docker.io/my.user/tool",
            "index.docker.io/my.user/tool",
        ])
    );
}

#[test]
fn identifier_synonym_is_dropped() {
    // Without "library/" the path would read as an image id
    let hex = OTHER_DIGEST.trim_start_matches("sha256:");
    let name = ImageName::parse(&format!("library/{}", hex)).unwrap();
    assert_eq!(name.path().unwrap(), format!("library/{}", hex));
    let expected: BTreeSet<String> = ["", "docker.io/", "index.docker.io/"]
        .iter()
        .map(|host| format!("{}library/{}", host, hex))
        .collect();
    assert_eq!(synonym_strings(&name), expected);
    for synonym in name.synonyms() {
        assert_eq!(synonym.normalize(), name);
        assert_eq!(synonym.normalize().synonyms(), name.synonyms());
        assert_eq!(synonym.normalize().host().unwrap(), "docker.io");
    }
}

#[test]
fn oversized_synonym_is_dropped() {
    // 253 characters with "docker.io", 259 with "index.docker.io"
    let repository = "a".repeat(235);
    let name = ImageName::parse(&repository).unwrap();
    assert_eq!(
        name.name().unwrap().len(),
        crate::reference::NAME_TOTAL_LENGTH_MAX - 2
    );
    let expected: BTreeSet<String> = ["", "library/", "docker.io/library/"]
        .iter()
        .map(|prefix| format!("{}{}", prefix, repository))
        .collect();
    assert_eq!(synonym_strings(&name), expected);
    assert!(ImageName::parse(&format!("index.docker.io/library/{}", repository)).is_err());
    for synonym in name.synonyms() {
        assert_eq!(synonym.normalize(), name);
        assert_eq!(synonym.normalize().synonyms(), name.synonyms());
    }
}

#[test]
fn other_registry_has_no_synonyms() {
    let name = ImageName::parse("myregistry.example.com/foo").unwrap();
    assert_eq!(name.host().unwrap(), "myregistry.example.com");
    assert_eq!(name.path().unwrap(), "foo");
    assert_eq!(synonym_strings(&name), strings(&["myregistry.example.com/foo"]));

    let name = ImageName::parse("localhost:5000/foo/bar:dev").unwrap();
    assert_eq!(name.host().unwrap(), "localhost:5000");
    assert_eq!(synonym_strings(&name), strings(&["localhost:5000/foo/bar:dev"]));
}

#[test]
fn empty_name() {
    let name = ImageName::EMPTY;
    assert!(name.is_empty());
    assert_eq!(name, ImageName::default());
    assert_eq!(name.digest(), Digest::EMPTY);
    assert_eq!(name.tag(), None);
    assert_eq!(name.as_str(), "");
    assert_eq!(name.without_digest(), "");
    assert_eq!(name.without_tag(), ImageName::EMPTY);
    assert_eq!(name.normalize(), ImageName::EMPTY);
    assert_eq!(
        name.synonyms().into_iter().collect::<Vec<_>>(),
        vec![ImageName::EMPTY]
    );
    assert_eq!(name.path(), Err(NameError::Empty));
    assert_eq!(name.host(), Err(NameError::Empty));
    assert_eq!(name.name(), Err(NameError::Empty));
    assert_eq!(name.with_tag("latest"), Err(NameError::Empty));
    assert_eq!(name.with_digest(&Digest::new(DIGEST)), Err(NameError::Empty));
}

#[test]
fn with_tag() {
    let tagged = ImageName::parse("ubuntu:some-tag").unwrap();
    let retagged = tagged.with_tag("test-tag").unwrap();
    assert_eq!(retagged.tag(), Some("test-tag"));
    assert_eq!(tagged.tag(), Some("some-tag"));

    let plain = ImageName::parse("ubuntu").unwrap();
    let tagged = plain.with_tag("test-tag").unwrap();
    assert_eq!(tagged.tag(), Some("test-tag"));
    assert_eq!(tagged.path().unwrap(), "library/ubuntu");

    let digested = ImageName::parse(&format!("ubuntu@{}", DIGEST)).unwrap();
    let tagged = digested.with_tag("test-tag").unwrap();
    assert_eq!(tagged.digest(), Digest::new(DIGEST));
}

#[test]
fn with_invalid_tag() {
    let name = ImageName::parse("ubuntu").unwrap();
    let err = name.with_tag("-invalid").unwrap_err();
    assert_eq!(
        err,
        NameError::ApplyTag {
            tag: "-invalid".to_owned(),
            name: "docker.io/library/ubuntu".to_owned(),
            source: ReferenceError::InvalidTagFormat("-invalid".to_owned()),
        }
    );
    assert_eq!(
        err.to_string(),
        "cannot apply tag -invalid to image name docker.io/library/ubuntu: invalid tag format: \"-invalid\""
    );
}

#[test]
fn without_tag() {
    let name = ImageName::parse("ubuntu:some-tag").unwrap();
    let untagged = name.without_tag();
    assert_eq!(untagged.tag(), None);
    assert_eq!(untagged.as_str(), "docker.io/library/ubuntu");

    let name = ImageName::parse("ubuntu").unwrap();
    assert_eq!(name.without_tag(), name);

    let name = ImageName::parse(&format!("ubuntu:some-tag@{}", DIGEST)).unwrap();
    assert_eq!(name.without_tag().digest(), Digest::new(DIGEST));
}

#[test]
fn with_digest() {
    let digest = Digest::new(OTHER_DIGEST);

    let tagged = ImageName::parse("ubuntu:some-tag").unwrap();
    let digested = tagged.with_digest(&digest).unwrap();
    assert_eq!(digested.tag(), Some("some-tag"));
    assert_eq!(digested.digest().as_str(), OTHER_DIGEST);
    assert_eq!(
        digested.as_str(),
        format!("docker.io/library/ubuntu:some-tag@{}", OTHER_DIGEST)
    );

    let plain = ImageName::parse("ubuntu").unwrap();
    let digested = plain.with_digest(&digest).unwrap();
    assert_eq!(digested.tag(), None);
    assert_eq!(
        digested.as_str(),
        format!("docker.io/library/ubuntu@{}", OTHER_DIGEST)
    );
}

#[test]
fn with_invalid_digest() {
    let hex = OTHER_DIGEST.trim_start_matches("sha256:");
    let name = ImageName::parse("ubuntu").unwrap();
    let err = name.with_digest(&Digest::new(hex)).unwrap_err();
    assert_eq!(
        err,
        NameError::ApplyDigest {
            digest: hex.to_owned(),
            name: "docker.io/library/ubuntu".to_owned(),
            source: ReferenceError::InvalidDigestFormat(hex.to_owned()),
        }
    );
    assert!(err.to_string().starts_with(&format!(
        "cannot apply digest {} to image name docker.io/library/ubuntu: ",
        hex
    )));
}

#[test]
fn serde_strings() {
    let name = ImageName::parse("ubuntu:18.10").unwrap();
    let json = serde_json::to_string(&name).unwrap();
    assert_eq!(json, "\"docker.io/library/ubuntu:18.10\"");
    let parsed: ImageName = serde_json::from_str("\"ubuntu:18.10\"").unwrap();
    assert_eq!(parsed, name);
    let empty: ImageName = serde_json::from_str("\"\"").unwrap();
    assert_eq!(empty, ImageName::EMPTY);
    assert!(serde_json::from_str::<ImageName>("\"Ubuntu\"").is_err());

    let id = Id::new(DIGEST);
    assert_eq!(serde_json::to_string(&id).unwrap(), format!("\"{}\"", DIGEST));
    let digest: Digest = serde_json::from_str(&format!("\"{}\"", DIGEST)).unwrap();
    assert_eq!(digest, Digest::new(DIGEST));
}

#[test]
fn digest_values() {
    assert!(Digest::EMPTY.is_empty());
    assert_eq!(Digest::EMPTY, Digest::default());
    assert_ne!(Digest::EMPTY, Digest::new(DIGEST));
    assert_eq!(Digest::new("not checked").as_str(), "not checked");
    assert!(Digest::new("not checked").content_digest().is_err());
    assert_eq!(
        Digest::new(DIGEST).content_digest().unwrap().algorithm_str(),
        "sha256"
    );
    assert_eq!(
        Digest::from_content(b"cat").as_str(),
        "sha256:77af778b51abd4a3c51c5ddd97204a9c3ae614ebccb75a606c3b6865aed6744e"
    );
}

#[test]
fn id_values() {
    assert!(Id::EMPTY.is_empty());
    assert_eq!(Id::EMPTY.filename(), "");
    let id = Id::new(DIGEST);
    assert_eq!(id.to_string(), DIGEST);
    assert_eq!(
        id.filename(),
        "sha256-deadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeef"
    );
    assert_eq!(Id::from_filename(&id.filename()), id);
    assert_eq!(Id::new("a:b:c").filename(), "a-b-c");
    assert_eq!(Id::from(Digest::new(DIGEST)), id);
}
