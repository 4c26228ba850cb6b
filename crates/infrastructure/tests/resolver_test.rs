use cobalt_dns_domain::{DnsError, Packet, QueryType, Record, ResponseCode};
use cobalt_dns_infrastructure::dns::resolver::RecursiveResolver;
use std::net::Ipv4Addr;
use std::sync::Arc;

mod helpers;
use helpers::{a_answer, nxdomain, referral, test_config, MockTransport};

const ROOT: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 1);
const GTLD: Ipv4Addr = Ipv4Addr::new(192, 5, 6, 30);
const GOOGLE: Ipv4Addr = Ipv4Addr::new(216, 58, 211, 142);

fn resolver(transport: MockTransport) -> RecursiveResolver {
    RecursiveResolver::new(Arc::new(transport), &test_config(ROOT))
}

#[tokio::test]
async fn test_follows_glued_referral() {
    let mut transport = MockTransport::new();
    transport.answer(
        ROOT,
        "google.com",
        QueryType::A,
        referral("com", "a.gtld-servers.net", Some(GTLD)),
    );
    transport.answer(
        GTLD,
        "google.com",
        QueryType::A,
        a_answer("google.com", GOOGLE),
    );

    let resolver = resolver(transport);
    let response = resolver
        .recursive_lookup("google.com", QueryType::A)
        .await
        .unwrap();

    assert_eq!(response.header.rescode, ResponseCode::NoError);
    assert_eq!(response.random_a_record(), Some(GOOGLE));
}

#[tokio::test]
async fn test_resolves_glueless_referral() {
    let mut transport = MockTransport::new();
    transport.answer(
        ROOT,
        "google.com",
        QueryType::A,
        referral("com", "a.gtld-servers.net", None),
    );
    // The name server's own address is answered at the root directly.
    transport.answer(
        ROOT,
        "a.gtld-servers.net",
        QueryType::A,
        a_answer("a.gtld-servers.net", GTLD),
    );
    transport.answer(
        GTLD,
        "google.com",
        QueryType::A,
        a_answer("google.com", GOOGLE),
    );

    let resolver = resolver(transport);
    let response = resolver
        .recursive_lookup("google.com", QueryType::A)
        .await
        .unwrap();

    assert_eq!(response.random_a_record(), Some(GOOGLE));
}

#[tokio::test]
async fn test_nxdomain_terminates_immediately() {
    let mut transport = MockTransport::new();
    transport.answer(ROOT, "no.such.name", QueryType::A, nxdomain());

    let resolver = resolver(transport);
    let response = resolver
        .recursive_lookup("no.such.name", QueryType::A)
        .await
        .unwrap();

    assert_eq!(response.header.rescode, ResponseCode::NxDomain);
    assert!(response.answers.is_empty());
}

#[tokio::test]
async fn test_dead_end_returns_last_response() {
    // NOERROR, no answers, no referral: nothing left to chase.
    let mut transport = MockTransport::new();
    transport.answer(ROOT, "empty.example", QueryType::A, Packet::new());

    let resolver = resolver(transport);
    let response = resolver
        .recursive_lookup("empty.example", QueryType::A)
        .await
        .unwrap();

    assert_eq!(response.header.rescode, ResponseCode::NoError);
    assert!(response.answers.is_empty());
}

#[tokio::test]
async fn test_any_answer_with_noerror_terminates() {
    // A bare CNAME still counts as an answer; the walk does not continue.
    let mut cname_only = Packet::new();
    cname_only.answers.push(Record::CNAME {
        domain: "www.example.com".to_string(),
        host: "example.com".to_string(),
        ttl: 300,
    });

    let mut transport = MockTransport::new();
    transport.answer(ROOT, "www.example.com", QueryType::A, cname_only);

    let resolver = resolver(transport);
    let response = resolver
        .recursive_lookup("www.example.com", QueryType::A)
        .await
        .unwrap();

    assert_eq!(response.answers.len(), 1);
    assert!(matches!(response.answers[0], Record::CNAME { .. }));
}

#[tokio::test]
async fn test_glueless_loop_hits_depth_limit() {
    // Every A query for the delegated name server is answered with the same
    // glueless referral, so each nested resolution spawns another.
    let looping = referral("test", "ns.deep.test", None);

    let mut transport = MockTransport::new();
    transport.answer(ROOT, "deep.test", QueryType::A, looping.clone());
    transport.answer(ROOT, "ns.deep.test", QueryType::A, looping);

    let resolver = resolver(transport);
    let result = resolver.recursive_lookup("deep.test", QueryType::A).await;

    assert!(matches!(result, Err(DnsError::DepthExceeded)));
}

#[tokio::test]
async fn test_unreachable_server_surfaces_transport_error() {
    let transport = MockTransport::new();

    let resolver = resolver(transport);
    let result = resolver.recursive_lookup("google.com", QueryType::A).await;

    assert!(matches!(result, Err(DnsError::Transport(_))));
}

#[tokio::test]
async fn test_lookup_decodes_the_reply() {
    let mut transport = MockTransport::new();
    transport.answer(
        ROOT,
        "google.com",
        QueryType::A,
        a_answer("google.com", GOOGLE),
    );

    let resolver = resolver(transport);
    let response = resolver
        .lookup("google.com", QueryType::A, ROOT, 53)
        .await
        .unwrap();

    assert!(response.header.response);
    assert_eq!(response.questions.len(), 1);
    assert_eq!(response.questions[0].name, "google.com");
    assert_eq!(response.random_a_record(), Some(GOOGLE));
}
