use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct WindowContext {
    pub season: String,
    pub data_root: PathBuf,

    pub buffer: u32,            // How many gameweeks before the current one get averaged
    pub max_gameweek: u32,      // Length of a Premier League season

    pub preview_rows: usize,
}

impl WindowContext {
    pub fn default() -> Self {
        Self {
            season: "2018-19".to_string(),
            data_root: PathBuf::from("./data"),

            buffer: 5,
            max_gameweek: 38,

            preview_rows: 5,
        }
    }

    pub fn from_args(args: &crate::Args) -> Self {
        Self {
            season: args.year.clone(),
            data_root: args.data_root.clone(),
            buffer: args.buffer,
            preview_rows: args.rows,
            ..Self::default()
        }
    }

    // Directory holding the gwN.csv files for the season
    pub fn season_dir(&self) -> PathBuf {
        self.data_root.join(&self.season).join("gws")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_season_dir() {
        let ctx = WindowContext::default();
        assert_eq!(ctx.season_dir(), PathBuf::from("./data/2018-19/gws"));
        assert_eq!(ctx.buffer, 5);
        assert_eq!(ctx.max_gameweek, 38);
    }

    #[test]
    fn test_season_used_verbatim() {
        let mut ctx = WindowContext::default();
        ctx.season = "2019-20 extra".to_string();
        ctx.data_root = PathBuf::from("/tmp/fpl");
        assert_eq!(ctx.season_dir(), PathBuf::from("/tmp/fpl/2019-20 extra/gws"));
    }
}
