use hickory_proto::op::ResponseCode as HickoryResponseCode;
use sluice_dns_application::ports::ResolutionStrategy;
use sluice_dns_domain::config::RecursionConfig;
use sluice_dns_domain::{DnsQuestion, DomainError, RecordType, ResponseCode};
use sluice_dns_infrastructure::dns::IterativeResolver;
use std::net::IpAddr;
use std::sync::Arc;

mod helpers;
use helpers::{query_name, ReplyBuilder, ScriptedTransport};

const ROOT_A: &str = "10.0.0.1";
const ROOT_B: &str = "10.0.0.2";
const TLD: &str = "10.1.0.1";
const AUTH: &str = "10.2.0.1";

fn config(roots: &[&str]) -> RecursionConfig {
    RecursionConfig {
        root_servers: roots.iter().map(|ip| ip.parse().unwrap()).collect(),
        ..RecursionConfig::default()
    }
}

fn resolver(transport: &Arc<ScriptedTransport>, roots: &[&str]) -> IterativeResolver {
    IterativeResolver::new(transport.clone(), &config(roots))
}

fn ip(text: &str) -> IpAddr {
    text.parse().unwrap()
}

/// Root delegating `com.` with glue, TLD delegating `example.com.` with glue,
/// authoritative server answering.
fn glued_hierarchy() -> ScriptedTransport {
    ScriptedTransport::new()
        .on(ROOT_A, |q| {
            ReplyBuilder::for_query(q)
                .referral("com.", "a.gtld.test.")
                .glue("a.gtld.test.", TLD)
                .build()
        })
        .on(TLD, |q| {
            ReplyBuilder::for_query(q)
                .referral("example.com.", "ns1.example.com.")
                .glue("ns1.example.com.", AUTH)
                .build()
        })
        .on(AUTH, |q| {
            ReplyBuilder::for_query(q)
                .authoritative()
                .answer_a(&query_name(q), "93.184.216.34", 3600)
                .build()
        })
}

#[tokio::test]
async fn test_follows_glued_delegations_to_the_answer() {
    let transport = Arc::new(glued_hierarchy());
    let resolver = resolver(&transport, &[ROOT_A]);

    let response = resolver
        .resolve(&DnsQuestion::new("www.example.com", RecordType::A))
        .await
        .unwrap();

    assert_eq!(response.rcode, ResponseCode::NoError);
    assert_eq!(response.records.len(), 1);
    assert_eq!(response.records[0].value, "93.184.216.34");
    assert_eq!(response.records[0].ttl, 3600);
    assert_eq!(transport.servers_called(), vec![ip(ROOT_A), ip(TLD), ip(AUTH)]);
}

#[tokio::test]
async fn test_failing_candidate_is_skipped() {
    let transport = Arc::new(glued_hierarchy());
    // ROOT_B has no script and fails like an unreachable host
    let resolver = resolver(&transport, &[ROOT_B, ROOT_A]);

    let response = resolver
        .resolve(&DnsQuestion::new("www.example.com", RecordType::A))
        .await
        .unwrap();

    assert_eq!(response.records.len(), 1);
    assert_eq!(transport.servers_called()[..2], [ip(ROOT_B), ip(ROOT_A)]);
}

#[tokio::test]
async fn test_refusing_candidate_is_skipped() {
    let transport = Arc::new(glued_hierarchy().on(ROOT_B, |q| {
        ReplyBuilder::for_query(q)
            .rcode(HickoryResponseCode::Refused)
            .build()
    }));
    let resolver = resolver(&transport, &[ROOT_B, ROOT_A]);

    let response = resolver
        .resolve(&DnsQuestion::new("www.example.com", RecordType::A))
        .await
        .unwrap();
    assert_eq!(response.records.len(), 1);
}

#[tokio::test]
async fn test_all_candidates_failing_is_servfail() {
    let transport = Arc::new(ScriptedTransport::new());
    let resolver = resolver(&transport, &[ROOT_A, ROOT_B]);

    let err = resolver
        .resolve(&DnsQuestion::new("www.example.com", RecordType::A))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::AllServersUnreachable(_)));
    assert_eq!(err.response_code(), ResponseCode::ServFail);
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn test_empty_authority_is_nxdomain() {
    let transport = Arc::new(ScriptedTransport::new().on(ROOT_A, |q| ReplyBuilder::for_query(q).build()));
    let resolver = resolver(&transport, &[ROOT_A]);

    let err = resolver
        .resolve(&DnsQuestion::new("nope.invalid", RecordType::A))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NoDelegation(_)));
    assert_eq!(err.response_code(), ResponseCode::NXDomain);
}

#[tokio::test]
async fn test_authoritative_nxdomain_is_nxdomain() {
    let transport = Arc::new(ScriptedTransport::new().on(ROOT_A, |q| {
        ReplyBuilder::for_query(q)
            .authoritative()
            .rcode(HickoryResponseCode::NXDomain)
            .build()
    }));
    let resolver = resolver(&transport, &[ROOT_A]);

    let err = resolver
        .resolve(&DnsQuestion::new("nope.example", RecordType::A))
        .await
        .unwrap_err();
    assert_eq!(err.response_code(), ResponseCode::NXDomain);
}

#[tokio::test]
async fn test_glueless_delegation_resolves_nameserver_from_root() {
    // example.org. is delegated to ns.example.com., which has no glue; its
    // address is found through the com. hierarchy.
    let transport = Arc::new(
        ScriptedTransport::new()
            .on(ROOT_A, |q| {
                let builder = ReplyBuilder::for_query(q);
                if query_name(q).ends_with("example.org.") {
                    builder.referral("example.org.", "ns.example.com.").build()
                } else {
                    builder
                        .referral("com.", "a.gtld.test.")
                        .glue("a.gtld.test.", TLD)
                        .build()
                }
            })
            .on(TLD, |q| {
                ReplyBuilder::for_query(q)
                    .authoritative()
                    .answer_a("ns.example.com.", AUTH, 3600)
                    .build()
            })
            .on(AUTH, |q| {
                ReplyBuilder::for_query(q)
                    .authoritative()
                    .answer_a(&query_name(q), "198.51.100.7", 300)
                    .build()
            }),
    );
    let resolver = resolver(&transport, &[ROOT_A]);

    let response = resolver
        .resolve(&DnsQuestion::new("www.example.org", RecordType::A))
        .await
        .unwrap();

    assert_eq!(response.records[0].value, "198.51.100.7");
    let calls = transport.calls();
    assert_eq!(calls[0], (ip(ROOT_A), "www.example.org.".to_string()));
    assert_eq!(calls[1], (ip(ROOT_A), "ns.example.com.".to_string()));
    assert_eq!(calls[2], (ip(TLD), "ns.example.com.".to_string()));
    assert_eq!(calls[3], (ip(AUTH), "www.example.org.".to_string()));
}

#[tokio::test]
async fn test_rounds_are_bounded() {
    // Four levels of glued delegation need a fourth round.
    let transport = Arc::new(
        ScriptedTransport::new()
            .on(ROOT_A, |q| {
                ReplyBuilder::for_query(q)
                    .referral("test.", "ns.l1.test.")
                    .glue("ns.l1.test.", "10.9.0.1")
                    .build()
            })
            .on("10.9.0.1", |q| {
                ReplyBuilder::for_query(q)
                    .referral("l1.test.", "ns.l2.test.")
                    .glue("ns.l2.test.", "10.9.0.2")
                    .build()
            })
            .on("10.9.0.2", |q| {
                ReplyBuilder::for_query(q)
                    .referral("l2.l1.test.", "ns.l3.test.")
                    .glue("ns.l3.test.", "10.9.0.3")
                    .build()
            })
            .on("10.9.0.3", |q| {
                ReplyBuilder::for_query(q)
                    .authoritative()
                    .answer_a(&query_name(q), "192.0.2.1", 60)
                    .build()
            }),
    );
    let resolver = resolver(&transport, &[ROOT_A]);

    let err = resolver
        .resolve(&DnsQuestion::new("deep.l2.l1.test", RecordType::A))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::RoundsExhausted(_)));
    assert_eq!(err.response_code(), ResponseCode::ServFail);
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test]
async fn test_nested_resolution_depth_is_bounded() {
    // Every answer is a glueless referral to a nameserver inside the zone
    // being resolved, so each nameserver lookup needs another one.
    let transport = Arc::new(ScriptedTransport::new().on(ROOT_A, |q| {
        let name = query_name(q);
        ReplyBuilder::for_query(q)
            .referral("loop.test.", &format!("ns.{}", name))
            .build()
    }));
    let max_depth = RecursionConfig::default().max_depth as usize;
    let resolver = resolver(&transport, &[ROOT_A]);

    let err = resolver
        .resolve(&DnsQuestion::new("www.loop.test", RecordType::A))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::RecursionDepthExceeded(_)));
    assert_eq!(err.response_code(), ResponseCode::ServFail);
    assert_eq!(transport.call_count(), max_depth + 1);
}

#[tokio::test]
async fn test_authoritative_root_answer_ends_the_walk() {
    let transport = Arc::new(ScriptedTransport::new().on(ROOT_A, |q| {
        ReplyBuilder::for_query(q)
            .authoritative()
            .answer_a(&query_name(q), "198.51.100.10", 600)
            .build()
    }));
    let resolver = resolver(&transport, &[ROOT_A, ROOT_B]);

    let response = resolver
        .resolve(&DnsQuestion::new("root-servers.test", RecordType::A))
        .await
        .unwrap();

    assert_eq!(response.rcode, ResponseCode::NoError);
    assert_eq!(response.records.len(), 1);
    assert_eq!(response.records[0].name, "root-servers.test.");
    assert_eq!(response.records[0].value, "198.51.100.10");
    assert_eq!(transport.call_count(), 1, "no second round after an authoritative answer");
}
