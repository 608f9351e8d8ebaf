//! Static marker tables driving context detection.
//!
//! Detection is data-driven: each table is an ordered list evaluated
//! top-to-bottom, so precedence is reviewable here rather than buried in
//! control flow.

/// Marker files identifying a language. Patterns are checked in order and
/// the first match wins for that language; a `*.` prefix means "any file
/// with this extension within the top two directory levels".
pub struct LanguageMarker {
    pub language: &'static str,
    pub patterns: &'static [&'static str],
}

pub const LANGUAGE_MARKERS: &[LanguageMarker] = &[
    LanguageMarker {
        language: "python",
        patterns: &["requirements.txt", "pyproject.toml", "setup.py", "Pipfile"],
    },
    LanguageMarker {
        language: "typescript",
        patterns: &["tsconfig.json"],
    },
    LanguageMarker {
        language: "javascript",
        patterns: &["package.json"],
    },
    LanguageMarker {
        language: "go",
        patterns: &["go.mod"],
    },
    LanguageMarker {
        language: "rust",
        patterns: &["Cargo.toml"],
    },
    LanguageMarker {
        language: "java",
        patterns: &["pom.xml", "build.gradle", "build.gradle.kts"],
    },
    LanguageMarker {
        language: "ruby",
        patterns: &["Gemfile"],
    },
    LanguageMarker {
        language: "php",
        patterns: &["composer.json"],
    },
    LanguageMarker {
        language: "csharp",
        patterns: &["*.csproj", "*.sln"],
    },
];

/// Unambiguous superset marker: when both `subset` and `superset` are
/// detected and the marker file exists, the subset language is dropped.
pub struct SupersetMarker {
    pub subset: &'static str,
    pub superset: &'static str,
    pub marker: &'static str,
}

pub const SUPERSET_MARKERS: &[SupersetMarker] = &[SupersetMarker {
    subset: "javascript",
    superset: "typescript",
    marker: "tsconfig.json",
}];

/// Dependency manifests parsed per language. Frameworks are only looked up
/// in manifests of languages already detected, to avoid false positives
/// from unrelated manifest files.
pub struct ManifestMarker {
    pub language: &'static str,
    pub manifests: &'static [&'static str],
}

pub const MANIFEST_MARKERS: &[ManifestMarker] = &[
    ManifestMarker {
        language: "python",
        manifests: &["requirements.txt", "pyproject.toml", "Pipfile"],
    },
    ManifestMarker {
        language: "typescript",
        manifests: &["package.json"],
    },
    ManifestMarker {
        language: "javascript",
        manifests: &["package.json"],
    },
    ManifestMarker {
        language: "go",
        manifests: &["go.mod"],
    },
    ManifestMarker {
        language: "rust",
        manifests: &["Cargo.toml"],
    },
    ManifestMarker {
        language: "java",
        manifests: &["pom.xml", "build.gradle", "build.gradle.kts"],
    },
    ManifestMarker {
        language: "ruby",
        manifests: &["Gemfile"],
    },
    ManifestMarker {
        language: "php",
        manifests: &["composer.json"],
    },
];

/// Framework detection: a dependency-list substring scoped to a language.
pub struct FrameworkMarker {
    pub framework: &'static str,
    pub language: &'static str,
    pub needle: &'static str,
}

pub const FRAMEWORK_MARKERS: &[FrameworkMarker] = &[
    FrameworkMarker { framework: "fastapi", language: "python", needle: "fastapi" },
    FrameworkMarker { framework: "django", language: "python", needle: "django" },
    FrameworkMarker { framework: "flask", language: "python", needle: "flask" },
    FrameworkMarker { framework: "react", language: "typescript", needle: "\"react\"" },
    FrameworkMarker { framework: "react", language: "javascript", needle: "\"react\"" },
    FrameworkMarker { framework: "nextjs", language: "typescript", needle: "\"next\"" },
    FrameworkMarker { framework: "nextjs", language: "javascript", needle: "\"next\"" },
    FrameworkMarker { framework: "express", language: "typescript", needle: "\"express\"" },
    FrameworkMarker { framework: "express", language: "javascript", needle: "\"express\"" },
    FrameworkMarker { framework: "vue", language: "typescript", needle: "\"vue\"" },
    FrameworkMarker { framework: "vue", language: "javascript", needle: "\"vue\"" },
    FrameworkMarker { framework: "nestjs", language: "typescript", needle: "@nestjs/core" },
    FrameworkMarker { framework: "gin", language: "go", needle: "gin-gonic/gin" },
    FrameworkMarker { framework: "echo", language: "go", needle: "labstack/echo" },
    FrameworkMarker { framework: "axum", language: "rust", needle: "axum" },
    FrameworkMarker { framework: "actix", language: "rust", needle: "actix-web" },
    FrameworkMarker { framework: "rocket", language: "rust", needle: "rocket" },
    FrameworkMarker { framework: "spring", language: "java", needle: "spring-boot" },
    FrameworkMarker { framework: "rails", language: "ruby", needle: "rails" },
    FrameworkMarker { framework: "laravel", language: "php", needle: "laravel/framework" },
];

/// Cloud provider detection: dedicated config files plus dependency-list
/// substrings checked across every manifest already read.
pub struct CloudMarker {
    pub provider: &'static str,
    pub config_files: &'static [&'static str],
    pub dependency_needles: &'static [&'static str],
}

pub const CLOUD_MARKERS: &[CloudMarker] = &[
    CloudMarker {
        provider: "aws",
        config_files: &["serverless.yml", "samconfig.toml", "terraform", "*.tf"],
        dependency_needles: &["boto3", "aws-sdk", "aws-cdk"],
    },
    CloudMarker {
        provider: "gcp",
        config_files: &["app.yaml", "cloudbuild.yaml"],
        dependency_needles: &["google-cloud", "firebase-admin"],
    },
    CloudMarker {
        provider: "azure",
        config_files: &["azure-pipelines.yml"],
        dependency_needles: &["azure-identity", "azure-mgmt", "@azure/"],
    },
    CloudMarker {
        provider: "vercel",
        config_files: &["vercel.json"],
        dependency_needles: &["@vercel/"],
    },
    CloudMarker {
        provider: "cloudflare",
        config_files: &["wrangler.toml"],
        dependency_needles: &["@cloudflare/workers"],
    },
];

pub const CI_MARKERS: &[&str] = &[
    ".github/workflows",
    ".gitlab-ci.yml",
    ".circleci/config.yml",
    "Jenkinsfile",
];

pub const CONTAINER_MARKERS: &[&str] = &["Dockerfile", "docker-compose.yml", "docker-compose.yaml"];

pub const TEST_DIR_MARKERS: &[&str] = &["tests", "test", "spec", "__tests__"];

pub const MONITORING_MARKERS: &[&str] = &[
    "prometheus.yml",
    "grafana",
    "sentry.properties",
    "newrelic.ini",
    "datadog.yaml",
];

/// Manifest files that carry a project version string, with the key that
/// precedes it.
pub const VERSION_MANIFESTS: &[(&str, &str)] = &[
    ("package.json", "\"version\""),
    ("Cargo.toml", "version"),
    ("pyproject.toml", "version"),
];
