//! Shell command plans for provisioning a database engine over SSH.

use contracts::deployment::{DatabaseKind, ServerConfig};

/// Build the ordered command list that installs the requested engine
/// and creates the database and its user on the target host.
pub fn provisioning_plan(server: &ServerConfig) -> Vec<String> {
    match server.database_type {
        DatabaseKind::PostgreSql => postgres_plan(server),
        DatabaseKind::MySql => mysql_plan(server),
        DatabaseKind::Redis => redis_plan(server),
    }
}

fn postgres_plan(server: &ServerConfig) -> Vec<String> {
    vec![
        "sudo apt-get update".to_string(),
        "sudo apt-get install -y postgresql postgresql-contrib".to_string(),
        format!("sudo -u postgres psql -c 'CREATE DATABASE {};'", server.database),
        format!(
            "sudo -u postgres psql -c \"CREATE USER {} WITH PASSWORD '{}';\"",
            server.username, server.password
        ),
        format!(
            "sudo -u postgres psql -c 'GRANT ALL PRIVILEGES ON DATABASE {} TO {};'",
            server.database, server.username
        ),
    ]
}

fn mysql_plan(server: &ServerConfig) -> Vec<String> {
    vec![
        "sudo apt-get update".to_string(),
        "sudo apt-get install -y mysql-server".to_string(),
        format!("sudo mysql -e 'CREATE DATABASE {};'", server.database),
        format!(
            "sudo mysql -e \"CREATE USER '{}'@'localhost' IDENTIFIED BY '{}';\"",
            server.username, server.password
        ),
        format!(
            "sudo mysql -e \"GRANT ALL PRIVILEGES ON {}.* TO '{}'@'localhost';\"",
            server.database, server.username
        ),
        "sudo mysql -e 'FLUSH PRIVILEGES;'".to_string(),
    ]
}

fn redis_plan(server: &ServerConfig) -> Vec<String> {
    let mut plan = vec![
        "sudo apt-get update".to_string(),
        "sudo apt-get install -y redis-server".to_string(),
        format!(
            "sudo sed -i 's/# requirepass foobared/requirepass {}/g' /etc/redis/redis.conf",
            server.password
        ),
        format!(
            "sudo sed -i 's/port 6379/port {}/g' /etc/redis/redis.conf",
            server.port
        ),
    ];

    // maxMemory is the only tuning knob the form exposes
    if let Some(extra) = &server.additional_config {
        if let Some(max_memory) = extra.get("maxMemory") {
            plan.push(format!(
                "sudo sed -i 's/# maxmemory <bytes>/maxmemory {}mb/g' /etc/redis/redis.conf",
                max_memory
            ));
        }
    }

    plan.push("sudo systemctl restart redis-server".to_string());
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn server(kind: DatabaseKind) -> ServerConfig {
        ServerConfig {
            host: "db.example.com".into(),
            port: 5432,
            username: "shop_admin".into(),
            password: "s3cret".into(),
            database_type: kind,
            database: "shop".into(),
            additional_config: None,
        }
    }

    #[test]
    fn postgres_plan_installs_then_creates_database_and_user() {
        let plan = provisioning_plan(&server(DatabaseKind::PostgreSql));
        assert_eq!(plan[0], "sudo apt-get update");
        assert!(plan[1].contains("postgresql"));
        assert!(plan.iter().any(|c| c.contains("CREATE DATABASE shop")));
        assert!(plan.iter().any(|c| c.contains("CREATE USER shop_admin")));
        assert!(plan.iter().any(|c| c.contains("GRANT ALL PRIVILEGES")));
    }

    #[test]
    fn mysql_plan_flushes_privileges_last() {
        let plan = provisioning_plan(&server(DatabaseKind::MySql));
        assert!(plan[1].contains("mysql-server"));
        assert_eq!(plan.last().unwrap(), "sudo mysql -e 'FLUSH PRIVILEGES;'");
    }

    #[test]
    fn redis_plan_sets_password_and_port() {
        let mut config = server(DatabaseKind::Redis);
        config.port = 6380;
        let plan = provisioning_plan(&config);
        assert!(plan.iter().any(|c| c.contains("requirepass s3cret")));
        assert!(plan.iter().any(|c| c.contains("port 6380")));
        assert!(!plan.iter().any(|c| c.contains("maxmemory")));
        assert_eq!(plan.last().unwrap(), "sudo systemctl restart redis-server");
    }

    #[test]
    fn redis_plan_applies_max_memory_when_configured() {
        let mut config = server(DatabaseKind::Redis);
        let mut extra = BTreeMap::new();
        extra.insert("maxMemory".to_string(), "256".to_string());
        config.additional_config = Some(extra);

        let plan = provisioning_plan(&config);
        assert!(plan.iter().any(|c| c.contains("maxmemory 256mb")));
    }
}
