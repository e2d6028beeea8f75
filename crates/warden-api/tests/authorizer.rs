use std::sync::Arc;
use std::time::Duration;

use axum::http::{
    HeaderMap, HeaderValue,
    header::{COOKIE, SET_COOKIE},
};
use warden_api::{AuthenticatedUser, Authorizer, CredentialError, GatewayError, SessionError};
use warden_config::{AuthMethod, AuthPolicy};
use warden_test_support::fixtures::{
    headers_with_cookie, headers_with_proxy_user, policy, proxy_policy, set_cookies,
};
use warden_test_support::mocks::{FailingTokenGateway, PendingTokenGateway, StaticTokenGateway};

fn with_static(policy: AuthPolicy) -> (Authorizer, Arc<StaticTokenGateway>) {
    let gateway = Arc::new(StaticTokenGateway::new().with_token("pub1", "secret1"));
    (Authorizer::new(policy, gateway.clone()), gateway)
}

#[tokio::test]
async fn unknown_method_allows_writes_without_identity() -> anyhow::Result<()> {
    let loaded = AuthPolicy::from_lookup(|key| {
        (key == "WARDEN_AUTH_METHOD").then(|| "ldap".to_string())
    })?;
    let (authz, _) = with_static(loaded);
    let user = AuthenticatedUser::from("alice");
    assert!(authz.is_authorized_for_action(&HeaderMap::new(), &user).await);
    assert_eq!(authz.user_id(&HeaderMap::new(), &user), "");
    Ok(())
}

#[tokio::test]
async fn token_validation_goes_through_the_gateway() -> anyhow::Result<()> {
    let (authz, gateway) = with_static(policy(AuthMethod::Token));
    let user = AuthenticatedUser::default();

    assert!(!authz.is_authorized_for_action(&HeaderMap::new(), &user).await);
    assert_eq!(gateway.validations(), 0);

    assert!(
        authz
            .is_authorized_for_action(&headers_with_cookie("pub1:secret1")?, &user)
            .await
    );
    assert!(
        !authz
            .is_authorized_for_action(&headers_with_cookie("pub1:wrong")?, &user)
            .await
    );
    assert!(
        !authz
            .is_authorized_for_action(&headers_with_cookie("no-separator")?, &user)
            .await
    );
    assert!(
        !authz
            .is_authorized_for_action(&headers_with_cookie("pub1:")?, &user)
            .await
    );
    assert_eq!(gateway.validations(), 2);

    let failing = Authorizer::new(policy(AuthMethod::Token), Arc::new(FailingTokenGateway));
    assert!(
        !failing
            .is_authorized_for_action(&headers_with_cookie("pub1:secret1")?, &user)
            .await
    );
    Ok(())
}

#[tokio::test]
async fn proxy_allow_list_edge_cases() -> anyhow::Result<()> {
    let user = AuthenticatedUser::default();
    let alice = headers_with_proxy_user("X-Forwarded-User", "alice")?;

    let (listed, _) = with_static(proxy_policy(&["bob", "alice"]));
    assert!(listed.is_authorized_for_action(&alice, &user).await);

    let (wildcard, _) = with_static(proxy_policy(&["*"]));
    assert!(wildcard.is_authorized_for_action(&alice, &user).await);
    assert!(wildcard.is_authorized_for_action(&HeaderMap::new(), &user).await);
    assert_eq!(wildcard.user_id(&HeaderMap::new(), &user), "");

    let (empty, _) = with_static(proxy_policy(&[]));
    assert!(!empty.is_authorized_for_action(&alice, &user).await);
    Ok(())
}

#[tokio::test]
async fn authenticate_token_round_trip() -> anyhow::Result<()> {
    let (authz, gateway) = with_static(policy(AuthMethod::Token));
    let mut headers = HeaderMap::new();
    authz.authenticate_token("pub1", &mut headers).await?;
    assert_eq!(
        set_cookies(&headers),
        vec!["access-token=pub1:secret1; Path=/".to_string()]
    );
    assert_eq!(gateway.acquisitions(), 1);

    let mut untouched = HeaderMap::new();
    let err = authz
        .authenticate_token("missing", &mut untouched)
        .await
        .expect_err("unknown token");
    assert!(matches!(
        err,
        SessionError::Gateway {
            source: GatewayError::TokenNotFound { .. }
        }
    ));
    assert!(untouched.get(SET_COOKIE).is_none());
    Ok(())
}

#[tokio::test]
async fn public_tokens_with_separators_never_issue_a_cookie() -> anyhow::Result<()> {
    let gateway = Arc::new(StaticTokenGateway::new().with_token("team:pub", "secret1"));
    let authz = Authorizer::new(policy(AuthMethod::Token), gateway.clone());
    let mut headers = HeaderMap::new();
    let err = authz
        .authenticate_token("team:pub", &mut headers)
        .await
        .expect_err("separator in public half");
    assert!(matches!(
        err,
        SessionError::Cookie {
            source: CredentialError::Unencodable,
            ..
        }
    ));
    assert!(headers.is_empty());
    assert_eq!(gateway.acquisitions(), 1);
    Ok(())
}

#[tokio::test]
async fn issued_cookie_survives_non_ascii_siblings() -> anyhow::Result<()> {
    let (authz, gateway) = with_static(policy(AuthMethod::Token));
    let mut issued = HeaderMap::new();
    authz.authenticate_token("pub1", &mut issued).await?;
    let session = set_cookies(&issued)
        .into_iter()
        .next()
        .and_then(|value| value.split(';').next().map(ToOwned::to_owned))
        .ok_or_else(|| anyhow::anyhow!("session cookie missing"))?;

    let mut request = HeaderMap::new();
    request.insert(
        COOKIE,
        HeaderValue::from_bytes(format!("name=Zoë; {session}").as_bytes())?,
    );
    assert!(
        authz
            .is_authorized_for_action(&request, &AuthenticatedUser::default())
            .await
    );
    assert_eq!(gateway.validations(), 1);
    Ok(())
}

#[tokio::test]
async fn proxy_identity_keeps_utf8_names() -> anyhow::Result<()> {
    let (authz, _) = with_static(proxy_policy(&["josé"]));
    let user = AuthenticatedUser::default();
    let request = headers_with_proxy_user("X-Forwarded-User", "josé")?;
    assert!(authz.is_authorized_for_action(&request, &user).await);
    assert_eq!(authz.user_id(&request, &user), "josé");
    Ok(())
}

#[tokio::test]
async fn concurrent_decisions_agree() -> anyhow::Result<()> {
    let (authz, _) = with_static(policy(AuthMethod::Token));
    let headers = Arc::new(headers_with_cookie("pub1:secret1")?);

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let authz = authz.clone();
            let headers = Arc::clone(&headers);
            tokio::spawn(async move {
                authz
                    .is_authorized_for_action(&headers, &AuthenticatedUser::default())
                    .await
            })
        })
        .collect();

    for task in tasks {
        assert!(task.await?);
    }
    Ok(())
}

#[tokio::test]
async fn dropping_a_decision_cancels_the_gateway_call() -> anyhow::Result<()> {
    let gateway = PendingTokenGateway::default();
    let authz = Authorizer::new(policy(AuthMethod::Token), Arc::new(gateway.clone()));
    let headers = headers_with_cookie("pub1:secret1")?;
    let user = AuthenticatedUser::default();

    let outcome = tokio::time::timeout(
        Duration::from_millis(20),
        authz.is_authorized_for_action(&headers, &user),
    )
    .await;
    assert!(outcome.is_err());
    assert!(gateway.cancelled());
    Ok(())
}
