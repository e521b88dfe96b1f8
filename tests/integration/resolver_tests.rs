//! Vendor resolution and provider handle tests

#[cfg(test)]
mod tests {
    use crate::common::{CredentialFactory, fixtures::ACCOUNT_ID, fixtures::GATEWAY_ID};
    use agent_gateway::core::providers::{
        CredentialOverrides, CredentialSource, Credentials, MapEnv, ProviderHandle, RequestContext,
        ResolveOptions, Vendor, VendorPreference, VendorResolver, VendorSelection,
    };
    use std::collections::HashMap;
    use std::sync::Arc;

    fn resolve(selection: VendorSelection, credentials: &Credentials) -> Vendor {
        VendorResolver::default()
            .resolve(selection, credentials, &ResolveOptions::default())
            .unwrap()
            .vendor()
    }

    #[test]
    fn test_auto_prefers_gateway_vendor_by_default() {
        assert_eq!(resolve(VendorSelection::Auto, &CredentialFactory::both()), Vendor::WorkersAi);
        assert_eq!(resolve(VendorSelection::Auto, &CredentialFactory::openai()), Vendor::OpenAi);

        let direct_first = VendorResolver::default().with_preference(VendorPreference::DirectFirst);
        let config = direct_first
            .resolve(VendorSelection::Auto, &CredentialFactory::both(), &ResolveOptions::default())
            .unwrap();
        assert_eq!(config.vendor(), Vendor::OpenAi);
    }

    #[test]
    fn test_explicit_vendor_never_falls_back() {
        let err = VendorResolver::default()
            .resolve(
                VendorSelection::Explicit(Vendor::OpenAi),
                &CredentialFactory::workers(),
                &ResolveOptions::default(),
            )
            .unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(err.message(), "openai requires OPENAI_API_KEY");

        let partial = Credentials {
            cloudflare_api_token: None,
            ..CredentialFactory::workers()
        };
        let err = VendorResolver::default()
            .resolve(
                VendorSelection::Explicit(Vendor::WorkersAi),
                &partial,
                &ResolveOptions::default(),
            )
            .unwrap_err();
        assert!(err.message().contains("CLOUDFLARE_API_TOKEN"));
        assert!(!err.message().contains("CLOUDFLARE_ACCOUNT_ID"));
    }

    #[test]
    fn test_placeholder_key_is_not_usable() {
        let credentials = Credentials {
            openai_api_key: Some("dummy".to_string()),
            ..CredentialFactory::workers()
        };
        assert_eq!(resolve(VendorSelection::Auto, &credentials), Vendor::WorkersAi);

        let only_placeholder = Credentials {
            openai_api_key: Some("dummy".to_string()),
            ..Default::default()
        };
        assert!(
            VendorResolver::default()
                .resolve(VendorSelection::Auto, &only_placeholder, &ResolveOptions::default())
                .is_err()
        );
    }

    #[test]
    fn test_gateway_url_is_canonical() {
        let resolver = VendorResolver::default().with_gateway_root("https://gateway.example.com/v1/");
        let config = resolver
            .resolve(
                VendorSelection::Explicit(Vendor::WorkersAi),
                &CredentialFactory::workers(),
                &ResolveOptions::default(),
            )
            .unwrap();
        assert_eq!(
            config.base_url(),
            format!(
                "https://gateway.example.com/v1/{}/{}/workers-ai/v1",
                ACCOUNT_ID, GATEWAY_ID
            )
        );
        assert_eq!(
            config.headers().get("CF-AIG-Source").map(String::as_str),
            Some("agent-gateway")
        );
    }

    #[test]
    fn test_openai_routes_through_gateway_when_ids_present() {
        let config = VendorResolver::default()
            .resolve(
                VendorSelection::Explicit(Vendor::OpenAi),
                &CredentialFactory::both(),
                &ResolveOptions::default(),
            )
            .unwrap();
        assert!(config.base_url().ends_with("/openai/v1"));
        assert!(config.base_url().contains(GATEWAY_ID));

        let config = VendorResolver::default()
            .resolve(
                VendorSelection::Explicit(Vendor::OpenAi),
                &CredentialFactory::both(),
                &ResolveOptions {
                    base_url: Some("https://proxy.example.com/v1/".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(config.base_url(), "https://proxy.example.com/v1");
        assert!(!config.headers().contains_key("CF-AIG-Source"));
    }

    #[test]
    fn test_credential_precedence() {
        let env = MapEnv::new().with("OPENAI_API_KEY", "from-env");
        let source = CredentialSource::new(Arc::new(env));
        let context = RequestContext::new(HashMap::from([(
            "OPENAI_API_KEY".to_string(),
            "from-binding".to_string(),
        )]));

        let none = CredentialOverrides::default();
        assert_eq!(
            source.gather(&none, None).openai_api_key.as_deref(),
            Some("from-env")
        );
        assert_eq!(
            source.gather(&none, Some(&context)).openai_api_key.as_deref(),
            Some("from-binding")
        );

        let explicit = CredentialOverrides {
            api_key: Some("explicit".to_string()),
            ..Default::default()
        };
        assert_eq!(
            source.gather(&explicit, Some(&context)).openai_api_key.as_deref(),
            Some("explicit")
        );

        let blank = CredentialOverrides {
            api_key: Some("".to_string()),
            ..Default::default()
        };
        assert_eq!(
            source.gather(&blank, None).openai_api_key.as_deref(),
            Some("from-env")
        );
    }

    #[test]
    fn test_handle_descriptors_are_independent() {
        let config = VendorResolver::default()
            .resolve(VendorSelection::Auto, &CredentialFactory::openai(), &ResolveOptions::default())
            .unwrap();
        let handle = ProviderHandle::from_config(&config).with_default_model("gpt-4o-mini");

        let first = handle.descriptor(Some("gpt-4o"));
        let second = handle.descriptor(None);
        assert_eq!(first.model.as_deref(), Some("gpt-4o"));
        assert_eq!(second.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(first.base_url, second.base_url);
        assert_eq!(handle.info().name, "openai");
        assert!(!format!("{:?}", first).contains("sk-test"));
    }
}
