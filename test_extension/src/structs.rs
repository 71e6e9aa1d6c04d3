// Copyright (c) Microsoft Corporation
// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[allow(non_snake_case)]
pub struct HandlerEnvironment {
    pub logFolder: String,
    pub statusFolder: String,
    pub configFolder: String,
    pub heartbeatFile: Option<String>,
    pub deploymentid: Option<String>,
    pub rolename: Option<String>,
    pub instance: Option<String>,
    pub hostResolverAddress: Option<String>,
    pub eventsFolder: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct Handler {
    pub handlerEnvironment: HandlerEnvironment,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[allow(non_snake_case)]
pub struct StatusObj {
    pub name: String,
    pub operation: String,
    pub configurationAppliedTime: String,
    pub status: String,
    pub code: i32,
    pub formattedMessage: FormattedMessage,
    #[serde(default)]
    pub substatus: Vec<SubStatus>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[allow(non_snake_case)]
pub struct FormattedMessage {
    pub lang: String,
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[allow(non_snake_case)]
pub struct SubStatus {
    pub name: String,
    pub status: String,
    pub code: i32,
    pub formattedMessage: FormattedMessage,
}

#[derive(Serialize, Deserialize, Debug)]
#[allow(non_snake_case)]
pub struct TopLevelStatus {
    pub version: String,
    pub timestampUTC: String,
    pub status: StatusObj,
}

/// `<configFolder>/<seq>.settings`
#[derive(Serialize, Deserialize, Debug)]
#[allow(non_snake_case)]
pub struct HandlerSettingsFile {
    #[serde(default)]
    pub runtimeSettings: Vec<RuntimeSettings>,
}

#[derive(Serialize, Deserialize, Debug)]
#[allow(non_snake_case)]
pub struct RuntimeSettings {
    pub handlerSettings: HandlerSettings,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[allow(non_snake_case)]
pub struct HandlerSettings {
    pub publicSettings: Option<serde_json::Value>,
    pub protectedSettings: Option<String>,
    pub protectedSettingsCertThumbprint: Option<String>,
}

// extension specific PublicSettings
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct PublicSettings {
    #[serde(default)]
    pub script: String,
    #[serde(default)]
    pub fileUris: Vec<String>,
}

// extension specific ProtectedSettings
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct ProtectedSettings {
    #[serde(default)]
    pub secretString: String,
    #[serde(default)]
    pub secretScript: String,
    #[serde(default)]
    pub fileUris: Vec<String>,
    #[serde(default)]
    pub storageAccountName: String,
    #[serde(default)]
    pub storageAccountKey: String,
}

#[cfg(test)]
mod tests {
    #[test]
    fn handler_env_test() {
        //Create raw handler environment json string
        let json_handler: &str = r#"[{
            "version": 1.0,
            "handlerEnvironment": {
                "logFolder": "log",
                "configFolder": "config",
                "statusFolder": "status",
                "heartbeatFile": "heartbeat.json",
                "deploymentid": "000",
                "rolename": "test_rolename",
                "instance": "test_instance",
                "hostResolverAddress": "000",
                "eventsFolder": "test_kusto"
            }
        }]"#;

        //Deserialize handler environment json string
        let handler_env_obj: Vec<super::Handler> = serde_json::from_str(json_handler).unwrap();
        let handler_environment = handler_env_obj[0].handlerEnvironment.clone();

        assert_eq!("log", handler_environment.logFolder, "logFolder mismatch");
        assert_eq!(
            "config", handler_environment.configFolder,
            "configFolder mismatch"
        );
        assert_eq!(
            "status", handler_environment.statusFolder,
            "statusFolder mismatch"
        );
        assert_eq!(
            Some("heartbeat.json".to_string()),
            handler_environment.heartbeatFile,
            "heartbeatFile mismatch"
        );
        assert_eq!(
            Some("test_rolename".to_string()),
            handler_environment.rolename,
            "rolename mismatch"
        );
    }

    #[test]
    fn handler_env_minimal_test() {
        // the Linux agent only guarantees the three folders
        let json_handler: &str = r#"[{
            "name": "Microsoft.Azure.Extensions.GATestExt",
            "version": 1.0,
            "handlerEnvironment": {
                "logFolder": "/var/log/azure/GATestExt",
                "configFolder": "/var/lib/waagent/GATestExt/config",
                "statusFolder": "/var/lib/waagent/GATestExt/status"
            }
        }]"#;
        let handler_env_obj: Vec<super::Handler> = serde_json::from_str(json_handler).unwrap();
        let handler_environment = &handler_env_obj[0].handlerEnvironment;
        assert_eq!("/var/log/azure/GATestExt", handler_environment.logFolder);
        assert_eq!(None, handler_environment.heartbeatFile);
        assert_eq!(None, handler_environment.eventsFolder);
    }

    #[test]
    fn status_obj_test() {
        //Create raw status obj json string
        let json_status: &str = r#"{
            "version": "1.0",
            "timestampUTC": "2021-01-01T00:00:00Z",
            "status": {
                "name": "GuestAgentTestExtension",
                "operation": "enable",
                "configurationAppliedTime": "2021-01-01T00:00:00Z",
                "code": 0,
                "status": "transitioning",
                "formattedMessage": {
                    "lang": "en-US",
                    "message": "enabling in progress"
                }
            }
        }"#;

        let status_obj: super::TopLevelStatus = serde_json::from_str(json_status).unwrap();
        let status = status_obj.status;

        assert_eq!("1.0", status_obj.version, "version mismatch");
        assert_eq!(
            "2021-01-01T00:00:00Z", status_obj.timestampUTC,
            "timestampUTC mismatch"
        );
        assert_eq!("enable", status.operation, "operation mismatch");
        assert_eq!(0, status.code, "code mismatch");
        assert_eq!("transitioning", status.status, "status mismatch");
        assert!(status.substatus.is_empty(), "substatus defaults to empty");
    }

    #[test]
    fn settings_file_test() {
        let json_settings: &str = r#"{
            "runtimeSettings": [{
                "handlerSettings": {
                    "protectedSettingsCertThumbprint": "ABCDEF",
                    "protectedSettings": "MIIB",
                    "publicSettings": { "script": "ZWNobyBoaQ==", "fileUris": ["https://a/b.sh"] }
                }
            }]
        }"#;
        let settings: super::HandlerSettingsFile = serde_json::from_str(json_settings).unwrap();
        let handler_settings = &settings.runtimeSettings[0].handlerSettings;
        assert_eq!(
            Some("ABCDEF".to_string()),
            handler_settings.protectedSettingsCertThumbprint
        );

        let public: super::PublicSettings =
            serde_json::from_value(handler_settings.publicSettings.clone().unwrap()).unwrap();
        assert_eq!("ZWNobyBoaQ==", public.script);
        assert_eq!(vec!["https://a/b.sh".to_string()], public.fileUris);

        let protected: super::ProtectedSettings =
            serde_json::from_str(r#"{"secretString": "s"}"#).unwrap();
        assert_eq!("s", protected.secretString);
        assert!(protected.storageAccountKey.is_empty());
    }
}
