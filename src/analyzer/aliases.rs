//! Static lookup tables that turn import names into registry coordinates.

/// Java package prefixes mapped to the Maven `(groupId, artifactId)` that ships them.
pub const JAVA_IMPORT_ALIASES: &[(&str, (&str, &str))] = &[
    // JSON & serialization
    ("com.google.gson", ("com.google.code.gson", "gson")),
    ("com.fasterxml.jackson", ("com.fasterxml.jackson.core", "jackson-databind")),
    ("com.fasterxml.jackson.core", ("com.fasterxml.jackson.core", "jackson-core")),
    ("com.fasterxml.jackson.annotation", ("com.fasterxml.jackson.core", "jackson-annotations")),
    ("org.json", ("org.json", "json")),
    // Apache Commons
    ("org.apache.commons.lang3", ("org.apache.commons", "commons-lang3")),
    ("org.apache.commons.io", ("commons-io", "commons-io")),
    ("org.apache.commons.codec", ("commons-codec", "commons-codec")),
    ("org.apache.commons.collections4", ("org.apache.commons", "commons-collections4")),
    ("org.apache.commons.text", ("org.apache.commons", "commons-text")),
    // Logging
    ("org.slf4j", ("org.slf4j", "slf4j-api")),
    ("org.slf4j.impl", ("org.slf4j", "slf4j-simple")),
    ("ch.qos.logback", ("ch.qos.logback", "logback-classic")),
    ("org.apache.logging.log4j", ("org.apache.logging.log4j", "log4j-api")),
    ("org.apache.logging.log4j.core", ("org.apache.logging.log4j", "log4j-core")),
    // Testing
    ("org.junit", ("junit", "junit")),
    ("org.junit.jupiter", ("org.junit.jupiter", "junit-jupiter-api")),
    ("org.mockito", ("org.mockito", "mockito-core")),
    ("org.assertj", ("org.assertj", "assertj-core")),
    ("org.hamcrest", ("org.hamcrest", "hamcrest")),
    // Spring
    ("org.springframework", ("org.springframework", "spring-context")),
    ("org.springframework.boot", ("org.springframework.boot", "spring-boot")),
    ("org.springframework.web", ("org.springframework", "spring-web")),
    // Database & ORM
    ("org.hibernate", ("org.hibernate", "hibernate-core")),
    ("javax.persistence", ("javax.persistence", "javax.persistence-api")),
    ("jakarta.persistence", ("jakarta.persistence", "jakarta.persistence-api")),
    ("com.zaxxer.hikari", ("com.zaxxer", "HikariCP")),
    ("org.flywaydb.core", ("org.flywaydb", "flyway-core")),
    // HTTP clients
    ("org.apache.http", ("org.apache.httpcomponents", "httpclient")),
    ("okhttp3", ("com.squareup.okhttp3", "okhttp")),
    ("retrofit2", ("com.squareup.retrofit2", "retrofit")),
    // Google
    ("com.google.common", ("com.google.guava", "guava")),
    ("com.google.api.client", ("com.google.api-client", "google-api-client")),
    ("com.google.protobuf", ("com.google.protobuf", "protobuf-java")),
    // AWS SDK
    ("com.amazonaws.services.s3", ("com.amazonaws", "aws-java-sdk-s3")),
    ("com.amazonaws.auth", ("com.amazonaws", "aws-java-sdk-core")),
    // XML
    ("javax.xml.bind", ("javax.xml.bind", "jaxb-api")),
    // Kotlin
    ("kotlin", ("org.jetbrains.kotlin", "kotlin-stdlib")),
    // Validation, servlets
    ("com.networknt.schema", ("com.networknt", "json-schema-validator")),
    ("javax.servlet", ("javax.servlet", "javax.servlet-api")),
    ("jakarta.servlet", ("jakarta.servlet", "jakarta.servlet-api")),
    ("lombok", ("org.projectlombok", "lombok")),
];

/// Python import names that differ from their PyPI project name.
pub const PYTHON_PACKAGE_ALIASES: &[(&str, &str)] = &[
    ("sklearn", "scikit-learn"),
    ("dateutil", "python-dateutil"),
    ("PIL", "pillow"),
    ("yaml", "PyYAML"),
    ("cv2", "opencv-python"),
    ("bs4", "beautifulsoup4"),
    ("skimage", "scikit-image"),
    ("dotenv", "python-dotenv"),
    ("jwt", "PyJWT"),
    ("Crypto", "pycryptodome"),
];

/// License of the CPython standard library.
pub const PYTHON_STDLIB_LICENSE: &str = "PSF-2.0";

/// Top-level modules shipped with CPython.
pub const PYTHON_STDLIB: &[&str] = &[
    "__future__", "abc", "argparse", "array", "ast", "asyncio", "base64", "bisect",
    "builtins", "bz2", "calendar", "cmath", "codecs", "collections", "concurrent",
    "configparser", "contextlib", "copy", "csv", "ctypes", "dataclasses", "datetime",
    "decimal", "difflib", "email", "enum", "errno", "fnmatch", "fractions", "functools",
    "gc", "getpass", "gettext", "glob", "gzip", "hashlib", "heapq", "hmac", "html",
    "http", "importlib", "inspect", "io", "ipaddress", "itertools", "json", "logging",
    "lzma", "math", "mimetypes", "multiprocessing", "numbers", "operator", "os",
    "pathlib", "pickle", "platform", "pprint", "queue", "random", "re", "secrets",
    "select", "shlex", "shutil", "signal", "socket", "sqlite3", "ssl", "stat",
    "statistics", "string", "struct", "subprocess", "sys", "tarfile", "tempfile",
    "textwrap", "threading", "time", "timeit", "tkinter", "traceback", "types",
    "typing", "unittest", "urllib", "uuid", "warnings", "weakref", "xml", "zipfile",
    "zlib", "zoneinfo",
];

/// Maven coordinates for a Java import path, by longest package-prefix match.
pub fn java_coordinates(import: &str) -> Option<(&'static str, &'static str)> {
    JAVA_IMPORT_ALIASES
        .iter()
        .filter(|(prefix, _)| {
            import == *prefix
                || (import.starts_with(prefix) && import[prefix.len()..].starts_with('.'))
        })
        .max_by_key(|(prefix, _)| prefix.len())
        .map(|(_, coords)| *coords)
}

/// PyPI project name for a top-level Python import.
pub fn pypi_project(module: &str) -> &str {
    PYTHON_PACKAGE_ALIASES
        .iter()
        .find(|(import, _)| *import == module)
        .map(|(_, project)| *project)
        .unwrap_or(module)
}

pub fn is_python_stdlib(module: &str) -> bool {
    PYTHON_STDLIB.contains(&module)
}
