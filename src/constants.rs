pub const RAVELRY_API: &str = "https://api.ravelry.com";

pub mod endpoints {
    pub const PATTERNS_SEARCH: &str = "/patterns/search.json";

    pub const PROJECTS_SEARCH: &str = "/projects/search.json";

    pub const CURRENT_USER: &str = "/current_user.json";
}

pub mod env {
    pub const CLIENT_KEY: &str = "RAVELRY_CLIENT_KEY";

    pub const CLIENT_SECRET: &str = "RAVELRY_CLIENT_SECRET";

    pub const OAUTH_TOKEN: &str = "RAVELRY_OAUTH_TOKEN";

    pub const OAUTH_SECRET: &str = "RAVELRY_OAUTH_SECRET";
}

pub mod files {
    pub const STORED_PROJECTS: &str = "projects.json";

    pub const PATTERN_INDEX: &str = "pattern_index.json";

    pub const YARN_DETAIL_DIR: &str = "patterns";

    pub const YARN_CATALOG: &str = "yarn_names.json";

    pub const YARN_FIBERS: &str = "yarn_fibers.json";

    pub const ANALYSIS_DIR: &str = "analysis";
}

pub mod limits {

    pub const DEFAULT_TOP_N: usize = 10;

    pub const DEFAULT_TAG_TOP_N: usize = 20;

    pub const DEFAULT_TREND_MONTHS: usize = 12;
}
