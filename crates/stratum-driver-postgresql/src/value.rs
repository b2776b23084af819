use stratum_core::{
    stmt::{self, Value as CoreValue},
    Error, Result,
};
use tokio_postgres::{
    types::{accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type},
    Column, Row,
};

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> std::result::Result<IsNull, Box<dyn std::error::Error + Sync + Send>>
    where
        Self: Sized,
    {
        match &self.0 {
            stmt::Value::Bool(value) => value.to_sql(ty, out),
            stmt::Value::I64(value) => match *ty {
                Type::INT2 => i16::try_from(*value)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*value)?.to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            stmt::Value::F64(value) => match *ty {
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            stmt::Value::String(value) => value.to_sql(ty, out),
            stmt::Value::Bytes(value) => value.to_sql(ty, out),
            stmt::Value::Null => Ok(IsNull::Yes),
        }
    }

    accepts!(BOOL, INT2, INT4, INT8, FLOAT4, FLOAT8, TEXT, VARCHAR, BPCHAR, NAME, BYTEA);
    to_sql_checked!();
}

/// Converts column `index` of `row` to a core value, by the column's type.
pub(crate) fn from_row(index: usize, row: &Row, column: &Column) -> Result<CoreValue> {
    // The PostgreSQL type enum cannot be matched on, so compare one by one.
    let ty = column.type_();

    let value = if ty == &Type::TEXT
        || ty == &Type::VARCHAR
        || ty == &Type::BPCHAR
        || ty == &Type::NAME
    {
        get::<String>(row, index)?.map(CoreValue::String)
    } else if ty == &Type::BOOL {
        get::<bool>(row, index)?.map(CoreValue::Bool)
    } else if ty == &Type::INT2 {
        get::<i16>(row, index)?.map(|v| CoreValue::I64(v.into()))
    } else if ty == &Type::INT4 {
        get::<i32>(row, index)?.map(|v| CoreValue::I64(v.into()))
    } else if ty == &Type::INT8 {
        get::<i64>(row, index)?.map(CoreValue::I64)
    } else if ty == &Type::FLOAT4 {
        get::<f32>(row, index)?.map(|v| CoreValue::F64(v.into()))
    } else if ty == &Type::FLOAT8 {
        get::<f64>(row, index)?.map(CoreValue::F64)
    } else if ty == &Type::BYTEA {
        get::<Vec<u8>>(row, index)?.map(CoreValue::Bytes)
    } else {
        return Err(Error::invalid_result(format!(
            "column `{}` has unsupported type `{ty}`",
            column.name()
        )));
    };

    Ok(value.unwrap_or(CoreValue::Null))
}

fn get<'a, T: FromSql<'a>>(row: &'a Row, index: usize) -> Result<Option<T>> {
    row.try_get::<usize, Option<T>>(index)
        .map_err(Error::driver_operation_failed)
}
