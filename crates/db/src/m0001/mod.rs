mod inscription;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "inscription",
    "m0001",
    vec_box![],
    vec_box![inscription::CreateTable, inscription::CreateIdx1]
);
