#![allow(non_snake_case)]

//Every field is optional so that a missing field turns into a field-level
//validation error instead of a JSON rejection. The outer Option is the key,
//the inner one the value: `Some(None)` is an explicit `null`.
//Unknown keys are ignored.

#[derive(serde::Deserialize, serde::Serialize, Debug, Default, Clone)]
pub struct NuevoUsuario {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub nombre: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub direccion: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub telefono: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub correo: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub genero: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub edad: Option<Option<i64>>
}

/// PATCH body. Omitted keys are left unchanged; an explicit `null` is a field error.
#[derive(serde::Deserialize, serde::Serialize, Debug, Default, Clone)]
pub struct UsuarioParcial {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub nombre: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub direccion: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub telefono: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub correo: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub genero: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub edad: Option<Option<i64>>
}

#[derive(serde::Deserialize, Debug, Default, Clone)]
pub struct FiltroUsuarios {
    pub correo: Option<String>
}
