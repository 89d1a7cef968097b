//! Message tables shipped with the crate.

/// English validation messages, keyed by rule.
pub const ENGLISH: &[(&str, &str)] = &[
    ("required", "Field ':field' is required"),
    ("length", "Field ':field' must be exactly :length characters long"),
    ("min_length", "Field ':field' must be at least :min_length characters long"),
    ("max_length", "Field ':field' must not exceed :max_length characters"),
    ("min", "Field ':field' must be at least :min"),
    ("max", "Field ':field' must not exceed :max"),
    ("email", "Field ':field' must be a valid email address"),
    ("ip", "Field ':field' must be a valid IP address"),
    ("url", "Field ':field' must be a valid URL"),
    ("uuid", "Field ':field' must be a valid UUID"),
    ("regex", "Field ':field' does not match the required format"),
    ("number", "Field ':field' must be a valid number"),
    ("integer", "Field ':field' must be a whole number"),
    ("float", "Field ':field' must be a decimal number"),
    ("boolean", "Field ':field' must be true or false"),
    ("date", "Field ':field' must be a valid date"),
    ("datetime", "Field ':field' must be a valid date and time"),
    ("alpha", "Field ':field' can only contain letters"),
    ("alphanumeric", "Field ':field' can only contain letters and numbers"),
    ("numeric", "Field ':field' can only contain numbers"),
    ("phone", "Field ':field' must be a valid phone number"),
    ("credit_card", "Field ':field' must be a valid credit card number"),
    ("domain", "Field ':field' must be a valid domain name"),
    ("mac_address", "Field ':field' must be a valid MAC address"),
    ("json", "Field ':field' must be a valid JSON string"),
    ("base64", "Field ':field' must be a valid Base64 string"),
];

/// Spanish validation messages, keyed by rule.
pub const SPANISH: &[(&str, &str)] = &[
    ("required", "El campo ':field' es obligatorio"),
    ("length", "El campo ':field' debe tener exactamente :length caracteres"),
    ("min_length", "El campo ':field' debe tener al menos :min_length caracteres"),
    ("max_length", "El campo ':field' no debe exceder :max_length caracteres"),
    ("min", "El campo ':field' debe ser como mínimo :min"),
    ("max", "El campo ':field' no debe exceder :max"),
    ("email", "El campo ':field' debe ser una dirección de correo válida"),
    ("ip", "El campo ':field' debe ser una dirección IP válida"),
    ("url", "El campo ':field' debe ser una URL válida"),
    ("uuid", "El campo ':field' debe ser un UUID válido"),
    ("regex", "El campo ':field' no cumple con el formato requerido"),
    ("number", "El campo ':field' debe ser un número válido"),
    ("integer", "El campo ':field' debe ser un número entero"),
    ("float", "El campo ':field' debe ser un número decimal"),
    ("boolean", "El campo ':field' debe ser verdadero o falso"),
    ("date", "El campo ':field' debe ser una fecha válida"),
    ("datetime", "El campo ':field' debe ser una fecha y hora válidas"),
    ("alpha", "El campo ':field' solo puede contener letras"),
    ("alphanumeric", "El campo ':field' solo puede contener letras y números"),
    ("numeric", "El campo ':field' solo puede contener números"),
    ("phone", "El campo ':field' debe ser un número de teléfono válido"),
    ("credit_card", "El campo ':field' debe ser un número de tarjeta de crédito válido"),
    ("domain", "El campo ':field' debe ser un nombre de dominio válido"),
    ("mac_address", "El campo ':field' debe ser una dirección MAC válida"),
    ("json", "El campo ':field' debe ser una cadena JSON válida"),
    ("base64", "El campo ':field' debe ser una cadena Base64 válida"),
];
