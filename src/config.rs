use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub server_port: u16,
    pub log_level: String,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    pub admin_username: String,
    pub admin_password: String,
    pub cars_json_path: PathBuf,
    pub static_dir: PathBuf,
    pub upload_dir: PathBuf,
    pub upload_url_prefix: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://database.sqlite?mode=rwc".to_string()),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            server_port: env::var("SERVER_PORT")
                .or_else(|_| env::var("PORT"))
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            bcrypt_cost: env::var("BCRYPT_COST")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            admin_username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
            cars_json_path: env::var("CARS_JSON_PATH")
                .unwrap_or_else(|_| "assets/data/cars.json".to_string())
                .into(),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| ".".to_string()).into(),
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "assets/images/products".to_string())
                .into(),
            upload_url_prefix: env::var("UPLOAD_URL_PREFIX")
                .unwrap_or_else(|_| "/assets/images/products".to_string()),
        })
    }

    /// Configuration for tests and embedding: everything rooted under `root`,
    /// database left to the caller.
    pub fn for_root(root: impl Into<PathBuf>, jwt_secret: &str) -> Self {
        let root = root.into();
        Config {
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            server_port: 0,
            log_level: "info".to_string(),
            jwt_secret: jwt_secret.to_string(),
            bcrypt_cost: 4,
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            cars_json_path: root.join("assets/data/cars.json"),
            static_dir: root.clone(),
            upload_dir: root.join("assets/images/products"),
            upload_url_prefix: "/assets/images/products".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_root_places_paths_under_root() {
        let config = Config::for_root("/srv/site", "secret");

        assert_eq!(config.cars_json_path, PathBuf::from("/srv/site/assets/data/cars.json"));
        assert_eq!(config.upload_dir, PathBuf::from("/srv/site/assets/images/products"));
        assert_eq!(config.static_dir, PathBuf::from("/srv/site"));
        assert_eq!(config.jwt_secret, "secret");
    }
}
