//! Generated `on_*` and `set_*` builder methods.

use super::{CriteriaBuilder, Property, PropertyDelegate};
use crate::catalog::behaviors as b;
use crate::catalog::criteria as c;

/// Emit `pub fn $method(&mut self, params: $ty) -> $ret { self.$call(params) }`.
macro_rules! rule_methods {
    ($call:ident -> $ret:ty; $( $(#[$doc:meta])* $method:ident($ty:ty); )*) => {
        $(
            $(#[$doc])*
            pub fn $method(&mut self, params: $ty) -> $ret {
                self.$call(params)
            }
        )*
    };
}

/// Criteria are available both on `Property` (opening a rule) and on
/// `CriteriaBuilder` (extending the open rule).
macro_rules! criteria_methods {
    ($call:ident -> $ret:ty) => {
        rule_methods! { $call -> $ret;
            /// Requested hostname.
            on_hostname(c::Hostname);
            /// URL path, wildcards allowed.
            on_path(c::Path);
            on_file_extension(c::FileExtension);
            on_filename(c::Filename);
            on_request_header(c::RequestHeader);
            on_request_method(c::RequestMethod);
            on_request_protocol(c::RequestProtocol);
            on_request_type(c::RequestType);
            on_query_string_parameter(c::QueryStringParameter);
            on_cookie(c::Cookie);
            on_client_ip(c::ClientIp);
            on_client_certificate(c::ClientCertificate);
            on_user_agent(c::UserAgent);
            /// Regular expression over `matchString`, which may embed variables.
            on_regular_expression(c::RegularExpression);
            on_response_header(c::ResponseHeader);
            on_content_type(c::ContentType);
            on_match_response_code(c::MatchResponseCode);
            on_cacheability(c::Cacheability);
            on_origin_timeout(c::OriginTimeout);
            on_edge_workers_failure(c::EdgeWorkersFailure);
            on_token_authorization(c::TokenAuthorization);
            on_user_location(c::UserLocation);
            on_user_network(c::UserNetwork);
            on_server_location(c::ServerLocation);
            on_device_characteristic(c::DeviceCharacteristic);
            /// Value of a user variable; the variable is declared automatically
            /// by delegates that track declarations.
            on_match_variable(c::MatchVariable);
            on_time(c::Time);
            /// A stable percentage of clients.
            on_bucket(c::Bucket);
            on_metadata_stage(c::MetadataStage);
            /// Staging or production network.
            on_content_delivery_network(c::ContentDeliveryNetwork);
            on_match_cp_code(c::MatchCpCode);
        }
    };
}

impl<D: PropertyDelegate> Property<D> {
    criteria_methods!(criterion -> CriteriaBuilder<'_, D>);

    rule_methods! { behavior -> &mut Self;
        // origin
        /// Origin server the edge fetches from.
        set_origin(b::Origin);
        set_origin_characteristics(b::OriginCharacteristics);
        set_conditional_origin(b::ConditionalOrigin);
        set_timeout(b::Timeout);
        set_read_timeout(b::ReadTimeout);
        set_persistent_connection(b::PersistentConnection);
        set_persistent_client_connection(b::PersistentClientConnection);
        set_health_detection(b::HealthDetection);
        set_dns_async_refresh(b::DnsAsyncRefresh);
        set_dns_prefresh(b::DnsPrefresh);
        set_site_shield(b::SiteShield);
        /// Fallback when the origin is unavailable.
        set_fail_action(b::FailAction);

        // caching
        /// Edge cache TTL and header handling.
        set_caching(b::Caching);
        set_downstream_cache(b::DownstreamCache);
        set_cache_error(b::CacheError);
        set_cache_key_query_params(b::CacheKeyQueryParams);
        set_cache_key_ignore_case(b::CacheKeyIgnoreCase);
        set_cache_id(b::CacheId);
        set_cache_post(b::CachePost);
        set_cache_tag(b::CacheTag);
        set_cache_tag_visible(b::CacheTagVisible);
        set_cache_key_rewrite(b::CacheKeyRewrite);
        set_remove_vary(b::RemoveVary);
        set_validate_entity_tag(b::ValidateEntityTag);
        set_prefetch(b::Prefetch);
        set_prefetchable(b::Prefetchable);
        set_tiered_distribution(b::TieredDistribution);
        set_return_cache_status(b::ReturnCacheStatus);
        set_large_file_optimization(b::LargeFileOptimization);

        // headers
        set_modify_outgoing_response_header(b::ModifyOutgoingResponseHeader);
        set_modify_incoming_request_header(b::ModifyIncomingRequestHeader);
        set_modify_incoming_response_header(b::ModifyIncomingResponseHeader);
        set_modify_outgoing_request_header(b::ModifyOutgoingRequestHeader);
        set_modify_via_header(b::ModifyViaHeader);
        set_cors_support(b::CorsSupport);
        set_http_strict_transport_security(b::HttpStrictTransportSecurity);

        // routing
        set_redirect(b::Redirect);
        set_redirectplus(b::Redirectplus);
        set_rewrite_url(b::RewriteUrl);
        set_remove_query_parameter(b::RemoveQueryParameter);
        set_http_to_https_upgrade(b::HttpToHttpsUpgrade);
        set_deny_access(b::DenyAccess);
        set_construct_response(b::ConstructResponse);
        set_response_code(b::ResponseCode);
        set_edge_redirector(b::EdgeRedirector);

        // performance
        set_gzip_response(b::GzipResponse);
        set_brotli(b::Brotli);
        set_http3(b::Http3);
        set_sure_route(b::SureRoute);
        set_allow_transfer_encoding(b::AllowTransferEncoding);
        set_all_http_in_cache_hierarchy(b::AllHttpInCacheHierarchy);
        set_dynamic_throughtput_optimization(b::DynamicThroughtputOptimization);
        set_allow_post(b::AllowPost);
        set_allow_put(b::AllowPut);
        set_allow_delete(b::AllowDelete);
        set_allow_patch(b::AllowPatch);
        set_allow_options(b::AllowOptions);

        // observability
        set_report(b::Report);
        set_m_pulse(b::MPulse);
        set_real_user_monitoring(b::RealUserMonitoring);
        set_global_request_number(b::GlobalRequestNumber);
        set_breadcrumbs(b::Breadcrumbs);
        set_datastream(b::Datastream);

        // security
        set_verify_token_authorization(b::VerifyTokenAuthorization);
        set_web_application_firewall(b::WebApplicationFirewall);

        // edge logic
        /// Assign a user variable; `variableName` is declared automatically by
        /// delegates that track declarations.
        set_set_variable(b::SetVariable);
        set_edge_worker(b::EdgeWorker);
        set_custom_behavior(b::CustomBehavior);
        /// CP code for reporting and billing.
        set_cp_code(b::CpCode);
    }
}

impl<D: PropertyDelegate> CriteriaBuilder<'_, D> {
    criteria_methods!(criterion -> &mut Self);
}
