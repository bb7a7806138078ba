define_keyword! {
    /// Reserved words recognized by the SQL Server dialect, the common
    /// keyword table plus `TOP`.
    SqlServerKeyword => {
        ALL,
        ALTER,
        AND,
        AS,
        ASC,
        BETWEEN,
        BOTH,
        BY,
        CASE,
        CAST,
        COLLATE,
        COUNT,
        CREATE,
        CROSS,
        DAY,
        DELETE,
        DESC,
        DISTINCT,
        DROP,
        ELSE,
        END,
        EXCEPT,
        EXISTS,
        EXTRACT,
        FALSE,
        FETCH,
        FIRST,
        FOR,
        FROM,
        FULL,
        GROUP,
        HAVING,
        HOUR,
        IN,
        INDEX,
        INNER,
        INSERT,
        INTERSECT,
        INTERVAL,
        INTO,
        IS,
        JOIN,
        LAST,
        LATERAL,
        LEADING,
        LEFT,
        LIKE,
        LIMIT,
        MINUTE,
        MONTH,
        NATURAL,
        NEXT,
        NOT,
        NULL,
        NULLS,
        OFFSET,
        ON,
        ONLY,
        OR,
        ORDER,
        OUTER,
        PERCENT,
        RECURSIVE,
        RIGHT,
        ROW,
        ROWS,
        SECOND,
        SELECT,
        SET,
        SUBSTRING,
        TABLE,
        THEN,
        TIES,
        TIME,
        TIMESTAMP,
        TOP,
        TRAILING,
        TRIM,
        TRUE,
        UNION,
        UNNEST,
        UPDATE,
        USING,
        VALUES,
        VIEW,
        WHEN,
        WHERE,
        WITH,
        YEAR
    }
}
