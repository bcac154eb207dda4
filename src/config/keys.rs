//! Well-known setting keys.
//!
//! Every key is a plain dotted string; the typed accessors on
//! [`Settings`](super::Settings) perform any coercion.

pub const APPLICATION_NAME: &str = "application.name";
pub const APPLICATION_VERSION: &str = "application.version";
pub const ENGINE_VERSION_CHECK_URL: &str = "engine.version.url";
pub const AUTO_UPDATE: &str = "autoupdate";

pub const DB_DRIVER_NAME: &str = "data.driver_name";
pub const DB_DRIVER_PATH: &str = "data.driver_path";
pub const DB_CONNECTION_STRING: &str = "data.connection_string";
pub const DB_USER: &str = "data.user";
pub const DB_PASSWORD: &str = "data.password";
/// Directory holding the local data store. Usually artifact-relative.
pub const DATA_DIRECTORY: &str = "data.directory";
pub const DB_FILE_NAME: &str = "data.file_name";
pub const DB_VERSION: &str = "data.version";

pub const CVE_META_URL: &str = "cve.url.meta";
pub const CVE_MODIFIED_20_URL: &str = "cve.url-2.0.modified";
pub const CVE_MODIFIED_12_URL: &str = "cve.url-1.2.modified";
pub const CVE_MODIFIED_VALID_FOR_DAYS: &str = "cve.url.modified.validfordays";
pub const CVE_START_YEAR: &str = "cve.startyear";
pub const CVE_SCHEMA_1_2: &str = "cve.url-1.2.base";
pub const CVE_SCHEMA_2_0: &str = "cve.url-2.0.base";
pub const CPE_MODIFIED_VALID_FOR_DAYS: &str = "cpe.validfordays";
pub const CPE_URL: &str = "cpe.url";

pub const PROXY_SERVER: &str = "proxy.server";
pub const PROXY_PORT: &str = "proxy.port";
pub const PROXY_USERNAME: &str = "proxy.username";
pub const PROXY_PASSWORD: &str = "proxy.password";
/// Connection timeout in milliseconds.
pub const CONNECTION_TIMEOUT: &str = "connection.timeout";

/// Root under which the `dctemp` working directory is created.
pub const TEMP_DIRECTORY: &str = "temp.directory";
pub const MAX_DOWNLOAD_THREAD_POOL_SIZE: &str = "max.download.threads";
pub const SUPPRESSION_FILE: &str = "suppression.file";

pub const ANALYZER_JAR_ENABLED: &str = "analyzer.jar.enabled";
pub const ANALYZER_ARCHIVE_ENABLED: &str = "analyzer.archive.enabled";
pub const ANALYZER_PYTHON_DISTRIBUTION_ENABLED: &str = "analyzer.python.distribution.enabled";
pub const ANALYZER_PYTHON_PACKAGE_ENABLED: &str = "analyzer.python.package.enabled";
pub const ANALYZER_RUBY_GEMSPEC_ENABLED: &str = "analyzer.ruby.gemspec.enabled";
pub const ANALYZER_AUTOCONF_ENABLED: &str = "analyzer.autoconf.enabled";
pub const ANALYZER_CMAKE_ENABLED: &str = "analyzer.cmake.enabled";
pub const ANALYZER_ASSEMBLY_ENABLED: &str = "analyzer.assembly.enabled";
pub const ANALYZER_NUSPEC_ENABLED: &str = "analyzer.nuspec.enabled";
pub const ANALYZER_JAVASCRIPT_ENABLED: &str = "analyzer.javascript.enabled";
pub const ANALYZER_NEXUS_ENABLED: &str = "analyzer.nexus.enabled";
pub const ANALYZER_NODE_PACKAGE_ENABLED: &str = "analyzer.node.package.enabled";
pub const ANALYZER_NEXUS_URL: &str = "analyzer.nexus.url";
pub const ANALYZER_NEXUS_PROXY: &str = "analyzer.nexus.proxy";
pub const ANALYZER_CENTRAL_ENABLED: &str = "analyzer.central.enabled";
pub const ANALYZER_OPENSSL_ENABLED: &str = "analyzer.openssl.enabled";
pub const ANALYZER_CENTRAL_URL: &str = "analyzer.central.url";
pub const ANALYZER_ASSEMBLY_MONO_PATH: &str = "analyzer.assembly.mono.path";
pub const ANALYZER_PLATFORM_ENABLED: &str = "analyzer.platform.enabled";

/// Comma separated list of extra archive extensions.
pub const ADDITIONAL_ZIP_EXTENSIONS: &str = "extensions.zip";
pub const SKIP_TEST_SCOPE: &str = "skip.test.scope";
pub const SKIP_RUNTIME_SCOPE: &str = "skip.runtime.scope";
pub const SKIP_PROVIDED_SCOPE: &str = "skip.provided.scope";

pub const VFEED_DATA_FILE: &str = "vfeed.data_file";
pub const VFEED_CONNECTION_STRING: &str = "vfeed.connection_string";
pub const VFEED_DOWNLOAD_URL: &str = "vfeed.download_url";
pub const VFEED_DOWNLOAD_FILE: &str = "vfeed.download_file";
pub const VFEED_UPDATE_STATUS: &str = "vfeed.update_status";
pub const DOWNLOADER_QUICK_QUERY_TIMESTAMP: &str = "downloader.quick.query.timestamp";
