use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Country sites the marketplace runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Ar,
    Bo,
    Br,
    Cl,
    Co,
    Cr,
    Do,
    Ec,
    Gt,
    Hn,
    Mx,
    Ni,
    Pa,
    Py,
    Pe,
    Sv,
    Uy,
    Ve,
}

impl Region {
    pub const ALL: [Region; 18] = [
        Region::Ar,
        Region::Bo,
        Region::Br,
        Region::Cl,
        Region::Co,
        Region::Cr,
        Region::Do,
        Region::Ec,
        Region::Gt,
        Region::Hn,
        Region::Mx,
        Region::Ni,
        Region::Pa,
        Region::Py,
        Region::Pe,
        Region::Sv,
        Region::Uy,
        Region::Ve,
    ];

    /// Domain suffix used in the site's host name
    pub fn code(self) -> &'static str {
        match self {
            Region::Ar => "ar",
            Region::Bo => "bo",
            Region::Br => "br",
            Region::Cl => "cl",
            Region::Co => "co",
            Region::Cr => "cr",
            Region::Do => "do",
            Region::Ec => "ec",
            Region::Gt => "gt",
            Region::Hn => "hn",
            Region::Mx => "mx",
            Region::Ni => "ni",
            Region::Pa => "pa",
            Region::Py => "py",
            Region::Pe => "pe",
            Region::Sv => "sv",
            Region::Uy => "uy",
            Region::Ve => "ve",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Region::ALL
            .into_iter()
            .find(|region| region.code() == code)
            .ok_or_else(|| format!("unknown region '{}'", s))
    }
}

/// How search result pages are addressed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Search URL template; `{domain}` is replaced by the region code
    pub base_url: String,
    /// Items the site shows per page, used to compute page offsets
    pub page_increment: usize,
    /// Hard cap on pages visited per search
    pub max_pages: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://listado.mercadolibre.com.{domain}/".to_string(),
            page_increment: 50,
            max_pages: 100,
        }
    }
}

impl ScraperConfig {
    pub fn search_url(&self, region: Region, slug: &str) -> String {
        format!("{}{}", self.base_url.replace("{domain}", region.code()), slug)
    }

    /// URL of the zero-based `page_index`th results page.
    ///
    /// The offset saturates instead of wrapping on absurd increments.
    pub fn page_url(&self, region: Region, slug: &str, page_index: usize) -> String {
        let offset = page_index
            .saturating_mul(self.page_increment)
            .saturating_add(1);
        format!(
            "{}_Desde_{}_NoIndex_True",
            self.search_url(region, slug),
            offset
        )
    }
}

/// Search parameters for a listing scrape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    pub region: Region,
    pub query: String,
    /// Requested number of listings; the result may overshoot by up to one page
    pub limit: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            region: Region::Ar,
            query: String::new(),
            limit: 100,
        }
    }
}

/// URL and file name safe form of a query: lowercase, spaces as hyphens.
pub fn slugify(query: &str) -> String {
    query.trim().replace(' ', "-").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Notebook Gamer"), "notebook-gamer");
        assert_eq!(slugify("auto"), "auto");
    }

    #[test]
    fn test_region_parsing() {
        assert_eq!("ar".parse::<Region>().unwrap(), Region::Ar);
        assert_eq!("MX".parse::<Region>().unwrap(), Region::Mx);
        assert!("zz".parse::<Region>().is_err());
        assert_eq!(Region::ALL.len(), 18);
    }

    #[test]
    fn test_page_urls() {
        let config = ScraperConfig::default();
        assert_eq!(
            config.search_url(Region::Ar, "notebook-gamer"),
            "https://listado.mercadolibre.com.ar/notebook-gamer"
        );
        assert_eq!(
            config.page_url(Region::Ar, "notebook-gamer", 0),
            "https://listado.mercadolibre.com.ar/notebook-gamer_Desde_1_NoIndex_True"
        );
        assert_eq!(
            config.page_url(Region::Mx, "auto", 2),
            "https://listado.mercadolibre.com.mx/auto_Desde_101_NoIndex_True"
        );
    }

    #[test]
    fn test_huge_page_increment_does_not_overflow() {
        let config = ScraperConfig {
            page_increment: usize::MAX,
            ..ScraperConfig::default()
        };
        let url = config.page_url(Region::Ar, "auto", 3);
        assert!(url.ends_with(&format!("_Desde_{}_NoIndex_True", usize::MAX)));
    }
}
