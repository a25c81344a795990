//! The fixed rule catalog: static property tables and the visitor set.
//!
//! Thresholds and polarities encode the platform-documented defaults
//! (6 connections per host on cellular, 60-second request timeout,
//! 7-day resource timeout); boolean and enum rules flag the polarity
//! that increases data usage, battery drain, or staleness risk.

use phf::phf_map;

use super::caching::CachingVisitor;
use super::lifecycle::LifecycleVisitor;
use super::notification::NotificationVisitor;
use super::polling::PollingVisitor;
use super::properties::{AssignmentPolicy, PropertyRule, PropertyRuleVisitor};
use super::types::Category;
use super::RuleVisitor;

static SESSION_HTTP_RULES: &[PropertyRule] = &[
    PropertyRule {
        property: "httpShouldSetCookies",
        policy: AssignmentPolicy::Boolean {
            flag_when: true,
            recommendation: "Consider disabling cookie handling by setting httpShouldSetCookies to false if not required for your API calls.",
        },
        access_note: "Cookie setting property is being accessed. Consider disabling cookie handling if not required for your API calls.",
    },
    PropertyRule {
        property: "httpShouldUsePipelining",
        policy: AssignmentPolicy::Boolean {
            flag_when: false,
            recommendation: "Consider enabling HTTP pipelining by setting httpShouldUsePipelining to true for better performance.",
        },
        access_note: "HTTP pipelining property is being accessed. Consider enabling pipelining for better performance.",
    },
    PropertyRule {
        property: "httpCookieAcceptPolicy",
        policy: AssignmentPolicy::EnumOutside {
            allowed: &["onlyFromMainDocumentDomain"],
            recommendation: "Consider using .onlyFromMainDocumentDomain policy for cookie acceptance to accept only needed cookies from the main document domain.",
        },
        access_note: "Cookie acceptance policy is being accessed. Consider using .onlyFromMainDocumentDomain policy for better security.",
    },
    PropertyRule {
        property: "httpAdditionalHeaders",
        policy: AssignmentPolicy::Always {
            recommendation: "Review and optimize additional headers to include only necessary ones for your API calls. Unnecessary headers increase request size and processing overhead.",
        },
        access_note: "Additional headers are being accessed. Make sure to include only necessary headers for optimal performance.",
    },
];

static CONNECTION_RULES: &[PropertyRule] = &[
    PropertyRule {
        property: "allowsCellularAccess",
        policy: AssignmentPolicy::Boolean {
            flag_when: true,
            recommendation: "Consider setting allowsCellularAccess to false if your app does not require access to cellular networks.",
        },
        access_note: "Cellular access property is being accessed. Consider setting it to false if your app does not require cellular network access.",
    },
    PropertyRule {
        property: "waitsForConnectivity",
        policy: AssignmentPolicy::Boolean {
            flag_when: false,
            recommendation: "Consider setting waitsForConnectivity to true for better app performance.",
        },
        access_note: "Connectivity waiting property is being accessed. Consider setting it to true for better app performance.",
    },
    PropertyRule {
        property: "networkServiceType",
        policy: AssignmentPolicy::EnumOutside {
            allowed: &["default", "background"],
            recommendation: "Check the usage of networkServiceType. Default value is 'default'. .video, .voice, .responsiveData, .avStreaming may impact the network if not needed.",
        },
        access_note: "Network service type is being accessed. Make sure to use appropriate service type for your app's needs.",
    },
];

static CONTENT_DELIVERY_RULES: &[PropertyRule] = &[
    PropertyRule {
        property: "httpMaximumConnectionsPerHost",
        policy: AssignmentPolicy::IntAbove {
            limit: 6,
            recommendation: "Consider setting a more appropriate value for httpMaximumConnectionsPerHost. Default value is 6 for cellular and 4 for wifi.",
        },
        access_note: "Content delivery property 'httpMaximumConnectionsPerHost' is being accessed. Make sure to set appropriate values for optimal network performance.",
    },
    PropertyRule {
        property: "allowsExpensiveNetworkAccess",
        policy: AssignmentPolicy::Boolean {
            flag_when: true,
            recommendation: "Consider setting allowsExpensiveNetworkAccess to false if your app does not require access to expensive networks.",
        },
        access_note: "Content delivery property 'allowsExpensiveNetworkAccess' is being accessed. Make sure to set appropriate values for optimal network performance.",
    },
];

static TIMEOUT_RULES: &[PropertyRule] = &[
    PropertyRule {
        property: "timeoutIntervalForRequest",
        policy: AssignmentPolicy::IntOutside {
            min: 30,
            max: 120,
            recommendation: "Consider setting a more appropriate timeout value between 30 and 120 seconds. Property controls how long (in seconds) a task should wait for additional data. Default value is 60 seconds.",
        },
        access_note: "Timeout property 'timeoutIntervalForRequest' is being accessed. Make sure to set appropriate timeout values.",
    },
    PropertyRule {
        property: "timeoutIntervalForResource",
        policy: AssignmentPolicy::IntOutside {
            min: 3600,
            max: 648_000,
            recommendation: "Consider setting a more appropriate timeout value between 1 hour and 8 days. Property controls how long (in seconds) to wait for a complete resource to transfer before giving up. Default value is 7 days.",
        },
        access_note: "Timeout property 'timeoutIntervalForResource' is being accessed. Make sure to set appropriate timeout values.",
    },
];

static MULTIPATH_CASES: phf::Map<&'static str, &'static str> = phf_map! {
    "aggregate" => "Consider setting a more appropriate value for multipathServiceType. Aggregate may impact the network if not needed.",
};

static BACKGROUND_RULES: &[PropertyRule] = &[
    PropertyRule {
        property: "sessionSendsLaunchEvents",
        policy: AssignmentPolicy::Boolean {
            flag_when: true,
            recommendation: "Consider setting sessionSendsLaunchEvents to false if your app does not require access to launch events.",
        },
        access_note: "Launch events property is being accessed. Consider setting it to false if your app does not require access to launch events.",
    },
    PropertyRule {
        property: "multipathServiceType",
        policy: AssignmentPolicy::EnumAmong {
            cases: &MULTIPATH_CASES,
        },
        access_note: "Multipath service type is being accessed. Make sure to use appropriate service type for your app's needs.",
    },
];

/// The fixed set of rule visitors, freshly constructed per analysis run.
pub fn catalog() -> Vec<Box<dyn RuleVisitor>> {
    vec![
        Box::new(PropertyRuleVisitor::new(
            Category::SessionHttp,
            SESSION_HTTP_RULES,
        )),
        Box::new(PropertyRuleVisitor::new(
            Category::ConnectionManagement,
            CONNECTION_RULES,
        )),
        Box::new(PropertyRuleVisitor::new(
            Category::ContentDelivery,
            CONTENT_DELIVERY_RULES,
        )),
        Box::new(CachingVisitor::new()),
        Box::new(PropertyRuleVisitor::new(
            Category::PrefetchBackground,
            BACKGROUND_RULES,
        )),
        Box::new(PropertyRuleVisitor::new(Category::TimeoutRetry, TIMEOUT_RULES)),
        Box::new(PollingVisitor::new()),
        Box::new(LifecycleVisitor::new()),
        Box::new(NotificationVisitor::new()),
    ]
}
