use rusqlite::Connection;

use crate::error::Result;

pub const SUBSCRIBER_TABLE: &str = "CMC_SBSB_SUBSC";
pub const MEMBER_TABLE: &str = "CMC_MEME_MEMBER";
pub const ELIGIBILITY_TABLE: &str = "CMC_MEPE_PRCS_ELIG";
pub const CARE_PLAN_TABLE: &str = "CMC_CSPI_CS_PLAN";

/// Creates the four lookup tables and their indexes. Safe to run repeatedly.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS CMC_SBSB_SUBSC (
            SBSB_CK INTEGER PRIMARY KEY,
            SBSB_ID TEXT NOT NULL,
            GRGR_CK TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS CMC_MEME_MEMBER (
            MEME_CK INTEGER PRIMARY KEY,
            SBSB_CK INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS CMC_MEPE_PRCS_ELIG (
            MEPE_CK INTEGER PRIMARY KEY,
            MEME_CK INTEGER NOT NULL,
            GRGR_CK TEXT NOT NULL,
            CSPD_CAT TEXT NOT NULL,
            CSPI_ID TEXT NOT NULL,
            MEPE_EFF_DT TEXT NOT NULL,
            MEPE_TERM_DT TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS CMC_CSPI_CS_PLAN (
            GRGR_CK TEXT NOT NULL,
            CSPD_CAT TEXT NOT NULL,
            CSPI_ID TEXT NOT NULL,
            CSPI_PFX TEXT NOT NULL,
            CSPI_EFF_DT TEXT NOT NULL,
            CSPI_TERM_DT TEXT NOT NULL,
            PRIMARY KEY (GRGR_CK, CSPD_CAT, CSPI_ID, CSPI_EFF_DT)
        );

        CREATE INDEX IF NOT EXISTS idx_sbsb_id ON CMC_SBSB_SUBSC(SBSB_ID);
        CREATE INDEX IF NOT EXISTS idx_meme_sbsb ON CMC_MEME_MEMBER(SBSB_CK);
        CREATE INDEX IF NOT EXISTS idx_mepe_meme ON CMC_MEPE_PRCS_ELIG(MEME_CK);
        CREATE INDEX IF NOT EXISTS idx_cspi_pfx ON CMC_CSPI_CS_PLAN(CSPI_PFX);",
    )?;

    Ok(())
}
