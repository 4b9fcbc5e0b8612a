// * Provider Constants
// * Central location for every fixed label, limit and endpoint of the Público feed

// * Provider domain as it appears inside article URLs
pub const PROVIDER_DOMAIN: &str = "publico.pt";

// * Homepage used whenever no usable article URL exists
pub const HOMEPAGE_URL: &str = "https://www.publico.pt";

// * List endpoint for the latest/top news
pub const TOP_NEWS_ENDPOINT: &str = "https://www.publico.pt/api/list/ultimas";

// * Detail endpoint; `{id}` is replaced with the article identifier
pub const ARTICLE_DETAIL_ENDPOINT: &str = "https://www.publico.pt/api/content/news/{id}";

// * Request timeout in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// * Sentinel printed when a field cannot be resolved
pub const NOT_AVAILABLE: &str = "Not available";

// * Title used when neither the record nor the caller supplies one
pub const UNTITLED: &str = "Untitled";

// * The provider's "epoch not set" date marker
pub const ZERO_DATE_SENTINEL: &str = "0001-01-01";

// * Maximum number of tags shown per article
pub const MAX_TAGS: usize = 6;

// * Separator between resolved author names
pub const AUTHOR_SEPARATOR: &str = ", ";

// * Letter-icon fallback
pub const PLACEHOLDER_LETTER: &str = "P";
pub const ACCENT_COLOR: &str = "#1E90FF";

// * Cyclic tag palette (FireBrick, Indigo, DarkGreen, SaddleBrown,
// * SteelBlue, Purple, DarkOrange, DarkSlateGray)
pub const TAG_PALETTE: [&str; 8] = [
    "#B22222", "#4B0082", "#006400", "#8B4513", "#4682B4", "#800080", "#FF8C00", "#2F4F4F",
];

// * Metadata row titles
pub const AUTHOR_ROW_TITLE: &str = "Author";
pub const PUBLISHED_ROW_TITLE: &str = "Published";
pub const KEYWORDS_ROW_TITLE: &str = "Keywords";
pub const TOPICS_ROW_TITLE: &str = "Tópicos";

// * Notice shown in place of a missing article body
pub const READ_ON_WEB_NOTICE: &str =
    "Para ler o artigo completo, por favor clique em \"Abrir no Navegador\".";
pub const WEB_ONLY_NOTICE: &str =
    "*O conteúdo completo deste artigo só está disponível no site do Publico.*";
