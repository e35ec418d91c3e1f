//! The Workbench's declared configuration schema.
//!
//! This is the single place that knows how legacy `application.yml` keys map
//! onto the cluster configuration schema. Most keys copy through verbatim;
//! the transforms below handle the handful that need rewriting.

use url::Url;

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::models::declaration::ConfigType;
use crate::domain::models::value::{ConfigMap, ConfigValue};
use crate::services::loader::ConfigLoader;

/// Build the declaration registry for the Workbench.
pub fn workbench_loader() -> ConfigLoader {
    let mut cfg = ConfigLoader::new();

    cfg.declare_legacy("ManagementToken", ConfigType::String, "management_token");
    cfg.declare_legacy("TLS.Insecure", ConfigType::Bool, "insecure_https");

    cfg.declare_legacy_with(
        "Services.Controller.ExternalURL",
        ConfigType::Url,
        "api_base_url",
        stripped_url,
    );
    cfg.declare_legacy_with(
        "Services.WebShell.ExternalURL",
        ConfigType::Url,
        "web_shell_url",
        hostname_wildcard_url,
    );
    cfg.declare_legacy_with(
        "Services.WebDAV.ExternalURL",
        ConfigType::Url,
        "keep_web_url",
        collection_wildcard_url,
    );
    cfg.declare_legacy_with(
        "Services.WebDAVDownload.ExternalURL",
        ConfigType::Url,
        "keep_web_download_url",
        collection_wildcard_url,
    );
    cfg.declare_legacy("Services.Composer.ExternalURL", ConfigType::Url, "composer_url");
    cfg.declare_legacy("Services.Workbench2.ExternalURL", ConfigType::Url, "workbench2_url");

    cfg.declare_legacy("Users.AnonymousUserToken", ConfigType::String, "anonymous_user_token");

    cfg.declare_legacy("Workbench.SecretToken", ConfigType::String, "secret_token");
    cfg.declare_legacy("Workbench.SecretKeyBase", ConfigType::String, "secret_key_base");

    cfg.declare_legacy_with(
        "Workbench.MimetypesWithViewIcon",
        ConfigType::Map,
        "mimetypes_with_view_icon",
        mimetype_list_to_map,
    );
    cfg.declare_legacy(
        "Workbench.RunningJobLogRecordsToFetch",
        ConfigType::Integer,
        "running_job_log_records_to_fetch",
    );
    cfg.declare_legacy("Workbench.LogViewerMaxBytes", ConfigType::Integer, "log_viewer_max_bytes");
    cfg.declare_legacy("Workbench.TrustAllContent", ConfigType::Bool, "trust_all_content");
    cfg.declare_legacy_with(
        "Workbench.UserProfileFormFields",
        ConfigType::Array,
        "user_profile_form_fields",
        null_to_empty_list,
    );
    cfg.declare_legacy(
        "Workbench.UserProfileFormMessage",
        ConfigType::String,
        "user_profile_form_message",
    );
    cfg.declare_legacy("Workbench.Theme", ConfigType::String, "site_theme");
    cfg.declare_legacy(
        "Workbench.ShowUserNotifications",
        ConfigType::Bool,
        "show_user_notifications",
    );
    cfg.declare_legacy(
        "Workbench.ShowUserAgreementInline",
        ConfigType::Bool,
        "show_user_agreement_inline",
    );
    cfg.declare_legacy("Workbench.RepositoryCache", ConfigType::String, "repository_cache");
    cfg.declare_legacy("Workbench.Repositories", ConfigType::Bool, "repositories");
    cfg.declare_legacy(
        "Workbench.APIClientConnectTimeout",
        ConfigType::Duration,
        "api_client_connect_timeout",
    );
    cfg.declare_legacy(
        "Workbench.APIClientReceiveTimeout",
        ConfigType::Duration,
        "api_client_receive_timeout",
    );
    cfg.declare_legacy(
        "Workbench.APIResponseCompression",
        ConfigType::Bool,
        "api_response_compression",
    );
    cfg.declare_legacy("Workbench.SiteName", ConfigType::String, "site_name");
    cfg.declare_legacy_with(
        "Workbench.MultiSiteSearch",
        ConfigType::String,
        "multi_site_search",
        scalar_to_string,
    );
    cfg.declare_legacy(
        "Workbench.EnablePublicProjectsPage",
        ConfigType::Bool,
        "enable_public_projects_page",
    );
    cfg.declare_legacy(
        "Workbench.EnableGettingStartedPopup",
        ConfigType::Bool,
        "enable_getting_started_popup",
    );
    cfg.declare_legacy("Workbench.PublicDataDocURL", ConfigType::String, "public_data_doc_url");
    cfg.declare_legacy("Workbench.DocsiteURL", ConfigType::String, "docsite_url");
    cfg.declare_legacy(
        "Workbench.ShowRecentCollectionsOnDashboard",
        ConfigType::Bool,
        "show_recent_collections_on_dashboard",
    );
    cfg.declare_legacy(
        "Workbench.ActivationContactLink",
        ConfigType::String,
        "activation_contact_link",
    );
    cfg.declare_legacy(
        "Workbench.DefaultOpenIdPrefix",
        ConfigType::String,
        "default_openid_prefix",
    );

    cfg.declare_legacy(
        "Mail.SendUserSetupNotificationEmail",
        ConfigType::Bool,
        "send_user_setup_notification_email",
    );
    cfg.declare_legacy(
        "Mail.IssueReporterEmailFrom",
        ConfigType::String,
        "issue_reporter_email_from",
    );
    cfg.declare_legacy("Mail.IssueReporterEmailTo", ConfigType::String, "issue_reporter_email_to");
    cfg.declare_legacy("Mail.SupportEmailAddress", ConfigType::String, "support_email_address");
    cfg.declare_legacy("Mail.EmailFrom", ConfigType::String, "email_from");

    // Fields the Workbench cannot run without.
    cfg.require("Services.Controller.ExternalURL");
    cfg.require("Workbench.SecretKeyBase");
    cfg.require("Workbench.SiteName");

    cfg
}

/// Set `path` to the URL with its path component stripped.
fn set_stripped_url(target: &mut ConfigMap, path: &str, raw: &str) -> ConfigResult<()> {
    if raw.is_empty() {
        target.set_at(path, ConfigValue::String(String::new()));
        return Ok(());
    }
    let mut parsed = Url::parse(raw).map_err(|_| ConfigError::InvalidConfigType {
        path: path.to_string(),
        expected: "URL",
        actual: format!("{raw:?} (string)"),
    })?;
    parsed.set_path("");
    target.set_at(path, ConfigValue::String(parsed.to_string()));
    Ok(())
}

fn url_input<'a>(path: &str, value: &'a ConfigValue) -> ConfigResult<&'a str> {
    match value {
        ConfigValue::Null => Ok(""),
        ConfigValue::String(s) => Ok(s),
        other => Err(ConfigError::InvalidConfigType {
            path: path.to_string(),
            expected: "URL",
            actual: other.type_name().to_string(),
        }),
    }
}

fn stripped_url(target: &mut ConfigMap, path: &str, value: &ConfigValue) -> ConfigResult<()> {
    set_stripped_url(target, path, url_input(path, value)?)
}

/// Legacy web-shell URLs embed a `%{hostname}` placeholder; the cluster
/// schema uses a `*` wildcard instead.
fn hostname_wildcard_url(target: &mut ConfigMap, path: &str, value: &ConfigValue) -> ConfigResult<()> {
    let raw = url_input(path, value)?.replace("%{hostname}", "*");
    set_stripped_url(target, path, &raw)
}

/// Legacy WebDAV URLs embed a `%{uuid_or_pdh}` placeholder; the cluster
/// schema uses a `*` wildcard instead.
fn collection_wildcard_url(target: &mut ConfigMap, path: &str, value: &ConfigValue) -> ConfigResult<()> {
    let raw = url_input(path, value)?.replace("%{uuid_or_pdh}", "*");
    set_stripped_url(target, path, &raw)
}

/// The legacy key is a list of mimetype names; the cluster schema keys a
/// mapping by mimetype.
fn mimetype_list_to_map(target: &mut ConfigMap, path: &str, value: &ConfigValue) -> ConfigResult<()> {
    let items = match value {
        ConfigValue::Null => &[][..],
        ConfigValue::List(items) => items.as_slice(),
        other => {
            return Err(ConfigError::InvalidConfigType {
                path: path.to_string(),
                expected: "array",
                actual: other.type_name().to_string(),
            })
        }
    };
    let mut mimetypes = ConfigMap::new();
    for item in items {
        let Some(name) = item.as_str() else {
            return Err(ConfigError::InvalidConfigType {
                path: path.to_string(),
                expected: "array of strings",
                actual: item.type_name().to_string(),
            });
        };
        mimetypes.insert(name, ConfigValue::Map(ConfigMap::new()));
    }
    target.set_at(path, ConfigValue::Map(mimetypes));
    Ok(())
}

/// A null legacy value becomes an empty list.
fn null_to_empty_list(target: &mut ConfigMap, path: &str, value: &ConfigValue) -> ConfigResult<()> {
    let list = match value {
        ConfigValue::Null => ConfigValue::List(vec![]),
        other => other.clone(),
    };
    target.set_at(path, list);
    Ok(())
}

/// Render whatever scalar the legacy key holds as a string; null becomes "".
fn scalar_to_string(target: &mut ConfigMap, path: &str, value: &ConfigValue) -> ConfigResult<()> {
    let s = match value {
        ConfigValue::Null => String::new(),
        ConfigValue::String(s) => s.clone(),
        ConfigValue::Bool(b) => b.to_string(),
        ConfigValue::Int(i) => i.to_string(),
        ConfigValue::Float(f) => f.to_string(),
        other => {
            return Err(ConfigError::InvalidConfigType {
                path: path.to_string(),
                expected: "string",
                actual: other.type_name().to_string(),
            })
        }
    };
    target.set_at(path, ConfigValue::String(s));
    Ok(())
}
