//! Fixed values shared by the stage configurators.
//!
//! Tool versions, SDK levels, repository URLs and the license header are part of
//! the build contract and are intentionally not configurable per module.

/// Platform and language levels for the packaged library.
pub mod project {
  pub const MIN_SDK_VERSION: u32 = 21;
  pub const COMPILE_SDK_VERSION: u32 = 34;
  pub const TARGET_SDK_VERSION: u32 = 34;

  pub const JAVA_SOURCE_COMPATIBILITY: &str = "1.8";
  pub const JAVA_TARGET_COMPATIBILITY: &str = "1.8";

  pub const KOTLIN_LANGUAGE_VERSION: &str = "1.5";
  pub const KOTLIN_API_VERSION: &str = "1.5";
  pub const KOTLIN_JVM_TARGET: &str = "1.8";

  pub const TEST_INSTRUMENTATION_RUNNER: &str = "androidx.test.runner.AndroidJUnitRunner";
  pub const CONSUMER_PROGUARD_FILE: &str = "consumer-rules.pro";
  pub const DEFAULT_PROGUARD_FILE: &str = "proguard-android.txt";
  pub const PROGUARD_RULES_FILE: &str = "proguard-rules.pro";

  /// Root of all generated outputs, relative to the module directory.
  pub const BUILD_DIR: &str = "build";
}

pub mod build_types {
  pub const RELEASE: &str = "release";
  pub const DEBUG: &str = "debug";
}

pub mod source_sets {
  pub const MAIN: &str = "main";
  pub const PHONE: &str = "phone";
}

pub mod flavors {
  pub const PHONE: &str = "phone";
  pub const TARGET_DIMENSION: &str = "target";
}

pub mod formatting {
  pub const KTLINT_VERSION: &str = "0.42.1";
  pub const GOOGLE_JAVA_FORMAT_VERSION: &str = "1.15.0";
  pub const PRETTIER_VERSION: &str = "2.7.1";
  pub const PRETTIER_JAVA_PLUGIN_VERSION: &str = "1.6.2";

  pub const JAVA_TARGETS: &str = "src/*/java/**/*.java";
  pub const KOTLIN_TARGETS: &str = "src/*/java/**/*.kt";

  pub const PRETTIER_TAB_WIDTH: u32 = 4;
  pub const PRETTIER_USE_TABS: bool = true;
  pub const PRETTIER_PRINT_WIDTH: u32 = 120;

  pub const TOGGLE_OFF: &str = "format:off";
  pub const TOGGLE_ON: &str = "format:on";

  /// `$YEAR` is substituted by the formatter when the header is first written.
  pub const LICENSE_HEADER: &str = r#"/*
  Copyright $YEAR Adobe. All rights reserved.
  This file is licensed to you under the Apache License, Version 2.0 (the "License");
  you may not use this file except in compliance with the License. You may obtain a copy
  of the License at http://www.apache.org/licenses/LICENSE-2.0
  Unless required by applicable law or agreed to in writing, software distributed under
  the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR REPRESENTATIONS
  OF ANY KIND, either express or implied. See the License for the specific language
  governing permissions and limitations under the License.
*/"#;
}

pub mod checkstyle {
  pub const TOOL_VERSION: &str = "8.36.1";

  pub const CONFIG: &str = r#"<?xml version="1.0"?>
<!DOCTYPE module PUBLIC
		"-//Puppy Crawl//DTD Check Configuration 1.2//EN"
		"http://www.puppycrawl.com/dtds/configuration_1_2.dtd">

<module name="Checker">
	<module name="SuppressWarningsFilter" />
	<module name="TreeWalker">
		<module name="SuppressWarningsHolder" />
		<module name="FinalParameters"/>
		<module name="BooleanExpressionComplexity"/>
		<module name="EqualsAvoidNull"/>
		<module name="FallThrough"/>
		<module name="NestedForDepth"/>
		<module name="NestedIfDepth"/>
		<module name="NestedTryDepth"/>
		<module name="MagicNumber"/>
		<module name="AvoidStaticImport"/>
		<module name="IllegalImport"></module>
		<module name="RedundantImport"></module>
		<module name="UnusedImports"></module>
	</module>
</module>"#;
}

pub mod publishing {
  pub const SNAPSHOTS_URL: &str = "https://oss.sonatype.org/content/repositories/snapshots/";
  pub const RELEASES_URL: &str = "https://oss.sonatype.org/service/local/staging/deploy/maven2/";

  /// Property whose presence marks a release build.
  pub const RELEASE_PROPERTY: &str = "release";
  /// Property whose presence marks a JitPack build.
  pub const JITPACK_PROPERTY: &str = "jitpack";
  pub const SNAPSHOT_SUFFIX: &str = "SNAPSHOT";

  pub const GROUP_ID: &str = "com.adobe.marketing.mobile";
  pub const JITPACK_GROUP_PREFIX: &str = "com.github.adobe";

  pub const PUBLICATION_NAME: &str = "release";
  pub const REPOSITORY_NAME: &str = "sonatype";

  pub const LICENSE_NAME: &str = "The Apache License, Version 2.0";
  pub const LICENSE_URL: &str = "https://www.apache.org/licenses/LICENSE-2.0.txt";
  pub const LICENSE_DIST: &str = "repo";

  pub const DEVELOPER_ID: &str = "adobe";
  pub const DEVELOPER_NAME: &str = "adobe";
  pub const DEVELOPER_EMAIL: &str = "adobe-mobile-testing@adobe.com";
  pub const DEVELOPER_DOC_URL: &str = "https://developer.adobe.com/client-sdks";

  pub const SCM_CONNECTION_URL_TEMPLATE: &str = "scm:git:github.com//adobe/{repo}.git";
  pub const SCM_REPO_URL_TEMPLATE: &str = "https://github.com/adobe/{repo}";

  pub const USERNAME_ENV: &str = "SONATYPE_USERNAME";
  pub const PASSWORD_ENV: &str = "SONATYPE_PASSWORD";

  pub const SIGNING_EXECUTABLE: &str = "gpg";
  pub const SIGNING_KEY_ENV: &str = "GPG_KEY_ID";
  pub const SIGNING_PASSPHRASE_ENV: &str = "GPG_PASSPHRASE";
}

pub mod reporting {
  pub const UNIT_TEST_EXECUTION_DATA: &str = "outputs/unit_test_code_coverage/phoneDebugUnitTest/*.exec";
  pub const FUNCTIONAL_TEST_EXECUTION_DATA: &str = "outputs/code_coverage/phoneDebugAndroidTest/connected/*coverage.ec";
  pub const CLASS_DIR: &str = "intermediates/javac/phoneDebug/classes/com/adobe/marketing/mobile";
  pub const BUILD_CONFIG_SOURCE: &str = "**/BuildConfig.java";
  pub const R_SOURCE: &str = "**/R.java";
  pub const ADB_CLASS: &str = "**/ADB*.class";
}

/// Prefix for environment variables that contribute to the property set.
pub const PROPERTY_ENV_PREFIX: &str = "FORGE_PROP_";
