use serde::Deserialize;

/// Selectors and positional assumptions for one travel site's pages.
///
/// Nothing here is verified against every page the site serves. The
/// defaults describe mafengwo.cn destination and attraction pages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteLayout {
    pub search_input_class: String,
    pub search_button_class: String,
    pub attractions_link_text: String,
    pub landmark_link_pattern: String,
    pub title_class: String,
    pub address_class: String,
    pub content_class: String,
    pub label_class: String,
    pub definition_tag: String,
}

impl Default for SiteLayout {
    fn default() -> Self {
        SiteLayout {
            search_input_class: "search-input".to_string(),
            search_button_class: "search-button".to_string(),
            attractions_link_text: "景点".to_string(),
            landmark_link_pattern: "景点 -".to_string(),
            title_class: "title".to_string(),
            address_class: "sub".to_string(),
            content_class: "content".to_string(),
            label_class: "label".to_string(),
            definition_tag: "dd".to_string(),
        }
    }
}
