//! Subcommand execution.
//!
//! Each command maps to one registry operation and renders its result as
//! JSON. Payloads are validated before they reach the service.

use std::collections::BTreeMap;

use serde_json::{Value, json};
use tenant_registry_persistence::validation::{validate_application, validate_tenant};
use tenant_registry_persistence::{
    Application, RegistryStorage, StorageGateway, Tenant, TenantDataService,
};
use tracing::info;

use crate::config::{ApplicationCommand, Command, TenantCommand};

/// Runs one command against the service.
pub async fn execute<G>(service: &TenantDataService<G>, command: Command) -> anyhow::Result<Value>
where
    G: StorageGateway + 'static,
{
    match command {
        Command::InitSchema => {
            service.gateway().initialize().await?;
            info!(backend = service.backend_name(), "Registry schema initialized");
            Ok(json!({ "status": "initialized", "backend": service.backend_name() }))
        }
        Command::Tenant(command) => execute_tenant(service, command).await,
        Command::Application(command) => execute_application(service, command).await,
    }
}

async fn execute_tenant<S>(service: &S, command: TenantCommand) -> anyhow::Result<Value>
where
    S: RegistryStorage + ?Sized,
{
    match command {
        TenantCommand::Create { secret_key } => {
            let tenant = Tenant::new(secret_key);
            validate_tenant(&tenant)?;
            let tenant_id = service.create_tenant(tenant).await?;
            Ok(json!({ "tenant_id": tenant_id }))
        }
        TenantCommand::Read { tenant_id } => {
            let tenant = service.read_tenant(tenant_id).await?;
            Ok(json!({ "tenant_id": tenant_id, "secret_key": tenant.secret_key }))
        }
        TenantCommand::Update {
            tenant_id,
            secret_key,
        } => {
            let tenant = Tenant::new(secret_key);
            validate_tenant(&tenant)?;
            service.update_tenant(tenant_id, tenant).await?;
            Ok(json!({ "tenant_id": tenant_id, "status": "updated" }))
        }
        TenantCommand::Delete { tenant_id } => {
            service.delete_tenant(tenant_id).await?;
            Ok(json!({ "tenant_id": tenant_id, "status": "deleted" }))
        }
    }
}

async fn execute_application<S>(service: &S, command: ApplicationCommand) -> anyhow::Result<Value>
where
    S: RegistryStorage + ?Sized,
{
    match command {
        ApplicationCommand::Create { tenant_id, name } => {
            let application = Application::new(name);
            validate_application(&application)?;
            let application_id = service.create_application(tenant_id, application).await?;
            Ok(json!({ "tenant_id": tenant_id, "application_id": application_id }))
        }
        ApplicationCommand::Read {
            tenant_id,
            application_id,
        } => {
            let application = service.read_application(tenant_id, application_id).await?;
            Ok(json!({
                "tenant_id": tenant_id,
                "application_id": application_id,
                "name": application.name,
            }))
        }
        ApplicationCommand::List { tenant_id } => {
            let applications: BTreeMap<_, _> = service
                .read_all_applications(tenant_id)
                .await?
                .into_iter()
                .collect();
            Ok(json!({ "tenant_id": tenant_id, "applications": applications }))
        }
        ApplicationCommand::Update {
            tenant_id,
            application_id,
            name,
        } => {
            let application = Application::new(name);
            validate_application(&application)?;
            service
                .update_application(tenant_id, application_id, application)
                .await?;
            Ok(json!({
                "tenant_id": tenant_id,
                "application_id": application_id,
                "status": "updated",
            }))
        }
        ApplicationCommand::Delete {
            tenant_id,
            application_id,
        } => {
            service.delete_application(tenant_id, application_id).await?;
            Ok(json!({
                "tenant_id": tenant_id,
                "application_id": application_id,
                "status": "deleted",
            }))
        }
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use std::sync::Arc;

    use tenant_registry_persistence::backends::sqlite::SqliteBackend;
    use tenant_registry_persistence::error::{StorageError, ValidationError};
    use tenant_registry_persistence::{ApplicationId, RandomIdGenerator, TenantId};

    use super::*;

    fn service() -> TenantDataService<SqliteBackend> {
        let backend = SqliteBackend::in_memory().unwrap();
        TenantDataService::new(Arc::new(backend), Arc::new(RandomIdGenerator))
    }

    fn id_field<T: std::str::FromStr>(value: &Value, field: &str) -> T
    where
        T::Err: std::fmt::Debug,
    {
        value[field].as_str().unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn test_init_schema_then_tenant_commands() {
        let service = service();
        let output = execute(&service, Command::InitSchema).await.unwrap();
        assert_eq!(output["status"], "initialized");

        let created = execute(
            &service,
            Command::Tenant(TenantCommand::Create {
                secret_key: "S1".into(),
            }),
        )
        .await
        .unwrap();
        let tenant_id: TenantId = id_field(&created, "tenant_id");

        let read = execute(&service, Command::Tenant(TenantCommand::Read { tenant_id }))
            .await
            .unwrap();
        assert_eq!(read["secret_key"], "S1");

        execute(&service, Command::Tenant(TenantCommand::Delete { tenant_id }))
            .await
            .unwrap();
        let err = execute(&service, Command::Tenant(TenantCommand::Read { tenant_id }))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Tenant not found. Tenant ID: {}", tenant_id)
        );
    }

    #[tokio::test]
    async fn test_application_list_output() {
        let service = service();
        execute(&service, Command::InitSchema).await.unwrap();
        let tenant_id = service.create_tenant(Tenant::new("S1")).await.unwrap();

        let created = execute(
            &service,
            Command::Application(ApplicationCommand::Create {
                tenant_id,
                name: "A1".into(),
            }),
        )
        .await
        .unwrap();
        let application_id: ApplicationId = id_field(&created, "application_id");

        let listed = execute(
            &service,
            Command::Application(ApplicationCommand::List { tenant_id }),
        )
        .await
        .unwrap();
        assert_eq!(
            listed["applications"][application_id.to_string()]["name"],
            "A1"
        );
    }

    #[tokio::test]
    async fn test_blank_payloads_are_rejected() {
        let service = service();
        execute(&service, Command::InitSchema).await.unwrap();

        let err = execute(
            &service,
            Command::Tenant(TenantCommand::Create {
                secret_key: "   ".into(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::Whitespace {
                field: "secret_key"
            })
        );

        let tenant_id = service.create_tenant(Tenant::new("S1")).await.unwrap();
        let err = execute(
            &service,
            Command::Application(ApplicationCommand::Create {
                tenant_id,
                name: String::new(),
            }),
        )
        .await
        .unwrap_err();
        assert!(err.downcast_ref::<ValidationError>().is_some());
        assert!(err.downcast_ref::<StorageError>().is_none());
    }
}
